pub mod auth;
pub mod clock;
pub mod usecase;

#[cfg(test)]
pub mod test_helpers;
