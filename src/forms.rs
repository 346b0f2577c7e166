use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().-]{5,19}$").expect("valid phone regex"));

/// Submitted fields for creating or fully overwriting a venue.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

fn require(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} is required"));
    }
}

fn check_phone(problems: &mut Vec<String>, phone: Option<&str>) {
    if let Some(phone) = phone {
        if !phone.trim().is_empty() && !PHONE_RE.is_match(phone.trim()) {
            problems.push(format!("phone number {phone:?} is not valid"));
        }
    }
}

fn finish(problems: Vec<String>) -> Result<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DirectoryError::Validation(problems))
    }
}

impl VenueForm {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        require(&mut problems, "name", &self.name);
        require(&mut problems, "city", &self.city);
        require(&mut problems, "state", &self.state);
        require(&mut problems, "address", &self.address);
        check_phone(&mut problems, self.phone.as_deref());
        finish(problems)
    }
}

impl ArtistForm {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        require(&mut problems, "name", &self.name);
        require(&mut problems, "city", &self.city);
        require(&mut problems, "state", &self.state);
        check_phone(&mut problems, self.phone.as_deref());
        finish(problems)
    }
}

impl ShowForm {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.artist_id <= 0 {
            problems.push(format!("artist_id {} is not valid", self.artist_id));
        }
        if self.venue_id <= 0 {
            problems.push(format!("venue_id {} is not valid", self.venue_id));
        }
        finish(problems)
    }
}
