use rand::{distributions::Alphanumeric, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{
    check_age, check_coordinate, check_firstname, check_random_key, check_secondname,
    ValidationError, USER_MAX_RANDOM_KEY_LENGTH, USER_MIN_RANDOM_KEY_LENGTH,
};

/// A row of the `users` table. `x` holds latitude and `y` longitude.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub secondname: String,
    pub age: i64,
    pub x: f64,
    pub y: f64,
    pub random_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Client-visible shape of a user; never carries the secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDisplay {
    pub id: String,
    pub firstname: String,
    pub secondname: String,
    pub age: i64,
    pub map: Coordinates,
}

/// Body of `POST /users` and `PUT /users/:id`. An `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub firstname: String,
    pub secondname: String,
    pub age: i64,
    pub map: Coordinates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesPatch {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Body of `PATCH /users/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub firstname: Option<String>,
    pub secondname: Option<String>,
    pub age: Option<i64>,
    pub map: Option<CoordinatesPatch>,
}

impl User {
    /// New record from a validated draft, with a fresh id and secret
    pub fn create(draft: UserDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            firstname: draft.firstname,
            secondname: draft.secondname,
            age: draft.age,
            x: draft.map.lat,
            y: draft.map.lon,
            random_key: random_key(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_firstname(&self.firstname)?;
        check_secondname(&self.secondname)?;
        check_age(self.age)?;
        check_coordinate(self.x)?;
        check_coordinate(self.y)?;
        check_random_key(&self.random_key)
    }

    pub fn to_display(&self) -> UserDisplay {
        UserDisplay {
            id: self.id.clone(),
            firstname: self.firstname.clone(),
            secondname: self.secondname.clone(),
            age: self.age,
            map: Coordinates { lat: self.x, lon: self.y },
        }
    }
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_firstname(&self.firstname)?;
        check_secondname(&self.secondname)?;
        check_age(self.age)?;
        check_coordinate(self.map.lat)?;
        check_coordinate(self.map.lon)
    }
}

impl UserPatch {
    /// Validate only the fields that are present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref v) = self.firstname {
            check_firstname(v)?;
        }
        if let Some(ref v) = self.secondname {
            check_secondname(v)?;
        }
        if let Some(v) = self.age {
            check_age(v)?;
        }
        if let Some(map) = self.map {
            if let Some(lat) = map.lat {
                check_coordinate(lat)?;
            }
            if let Some(lon) = map.lon {
                check_coordinate(lon)?;
            }
        }
        Ok(())
    }
}

/// Alphanumeric secret of 3 to 8 characters
fn random_key() -> String {
    let mut rng = thread_rng();
    let len = rng.gen_range(USER_MIN_RANDOM_KEY_LENGTH..=USER_MAX_RANDOM_KEY_LENGTH);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
