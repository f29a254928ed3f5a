use crate::schema::*;
use diesel::prelude::*;

/// A row of the `users` table. `password` holds an Argon2 PHC string.
#[derive(Queryable, PartialEq, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub is_active: bool,
}

/// Full overwrite applied by an update. `is_active` is never touched.
#[derive(AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChanges<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
