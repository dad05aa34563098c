use thiserror::Error;

pub const USER_MIN_AGE: i64 = 14;
pub const USER_MAX_AGE: i64 = 150;
pub const USER_MIN_NAME_LENGTH: usize = 3;
pub const USER_MAX_NAME_LENGTH: usize = 255;
pub const USER_MIN_RANDOM_KEY_LENGTH: usize = 3;
pub const USER_MAX_RANDOM_KEY_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("firstname must be {}-{} characters", USER_MIN_NAME_LENGTH, USER_MAX_NAME_LENGTH)]
    Firstname,

    #[error("secondname must be {}-{} characters", USER_MIN_NAME_LENGTH, USER_MAX_NAME_LENGTH)]
    Secondname,

    #[error("age must be between {} and {}", USER_MIN_AGE, USER_MAX_AGE)]
    Age,

    #[error("map coordinates must be finite numbers")]
    Map,

    #[error("random key must be {}-{} characters", USER_MIN_RANDOM_KEY_LENGTH, USER_MAX_RANDOM_KEY_LENGTH)]
    RandomKey,
}

impl ValidationError {
    /// Name of the offending field as clients see it
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Firstname => "firstname",
            ValidationError::Secondname => "secondname",
            ValidationError::Age => "age",
            ValidationError::Map => "map",
            ValidationError::RandomKey => "random_key",
        }
    }
}

fn char_len_within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

pub fn check_firstname(value: &str) -> Result<(), ValidationError> {
    if char_len_within(value, USER_MIN_NAME_LENGTH, USER_MAX_NAME_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::Firstname)
    }
}

pub fn check_secondname(value: &str) -> Result<(), ValidationError> {
    if char_len_within(value, USER_MIN_NAME_LENGTH, USER_MAX_NAME_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::Secondname)
    }
}

pub fn check_age(value: i64) -> Result<(), ValidationError> {
    if (USER_MIN_AGE..=USER_MAX_AGE).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::Age)
    }
}

pub fn check_coordinate(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::Map)
    }
}

pub fn check_random_key(value: &str) -> Result<(), ValidationError> {
    if char_len_within(value, USER_MIN_RANDOM_KEY_LENGTH, USER_MAX_RANDOM_KEY_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::RandomKey)
    }
}
