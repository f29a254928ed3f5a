use ::common::settings::{ApplicationSettings, DatabaseSettings, Settings};
use serde_json::Value;
use tempfile::TempDir;
use user_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    _dir: TempDir,
}

/// Boots the full application on a random port against a fresh SQLite file.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Unable to create temp dir");

    let settings = Settings {
        application: ApplicationSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: format!("sqlite:///{}", dir.path().join("users.db").display()),
            max_connections: 4,
            acquire_timeout_secs: 2,
        },
        debug: true,
    };

    let application = Application::build(settings)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn post_user(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/user", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn list_users(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/users", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_user(&self, id: i64) -> reqwest::Response {
        self.client
            .get(format!("{}/user/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_user(&self, id: i64, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}/user/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_user(&self, id: i64) -> reqwest::Response {
        self.client
            .delete(format!("{}/user/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Looks up the id of the stored user with `email` through the list route.
    pub async fn id_of(&self, email: &str) -> i64 {
        let body: Value = self
            .list_users()
            .await
            .json()
            .await
            .expect("List response is not JSON");

        body["users"]
            .as_array()
            .expect("users should be a list")
            .iter()
            .find(|u| u["email"] == email)
            .and_then(|u| u["id"].as_i64())
            .expect("User not listed")
    }
}
