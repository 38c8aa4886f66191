use std::str::FromStr;

use crate::auth::AccessToken;
use crate::prelude::*;

pub fn sample_rate(value: &str) -> Result<f32> {
    match f32::from_str(value)? {
        value if (0.0..=1.0).contains(&value) => Ok(value),
        value => Err(anyhow!("{} is not within 0..=1", value)),
    }
}

pub fn access_token(value: &str) -> Result<AccessToken> {
    AccessToken::from_str(value)
}
