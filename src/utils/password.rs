use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};

#[tracing::instrument(name = "Hashing user password", skip(password))]
pub fn hash(password: &SecretString) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)?
        .to_string())
}

#[cfg(test)]
pub fn verify_password(
    hash: &str,
    password: &SecretString,
) -> Result<(), argon2::password_hash::Error> {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    let parsed_hash = PasswordHash::new(hash)?;
    Argon2::default().verify_password(password.expose_secret().as_bytes(), &parsed_hash)
}
