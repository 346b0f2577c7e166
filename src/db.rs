use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use tracing::{debug, error};

use crate::error::{DirectoryError, Entity, Result};
use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::models::{
    Artist, ArtistDetail, CityGroup, NameRef, SearchResults, Show, ShowWithArtist, ShowWithNames,
    ShowWithVenue, Venue, VenueDetail, VenueSummary,
};
use crate::{config::ConfigStore, utils};

/// Injected handle over the backing store. Every operation runs in its own
/// statement or transaction scope; nothing is cached between calls.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> Result<Self> {
        let path = ConfigStore::load().read().database_path();
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self> {
        utils::ensure_parent(path);
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "directory database opened");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS venues(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                address TEXT NOT NULL,
                phone TEXT,
                image_link TEXT,
                genres TEXT NOT NULL DEFAULT '[]',
                facebook_link TEXT,
                website TEXT,
                seeking_talent INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT
            );
            CREATE TABLE IF NOT EXISTS artists(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                phone TEXT,
                genres TEXT NOT NULL DEFAULT '[]',
                image_link TEXT,
                website TEXT,
                facebook_link TEXT,
                seeking_venue INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT
            );
            CREATE TABLE IF NOT EXISTS shows(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE RESTRICT,
                venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE RESTRICT,
                start_time TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, start_time);
            CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, start_time);",
        )?;
        Ok(())
    }

    //  Venues
    //  ----------------------------------------------------------------

    /// Venues ordered by (city, state), one group per location, each venue
    /// annotated with its count of shows starting after `now`.
    ///
    /// The fold below only merges consecutive rows; the ORDER BY guarantees
    /// equal (city, state) pairs are adjacent, so this matches a true
    /// aggregate grouping.
    pub fn list_venue_groups(&self, now: DateTime<Utc>) -> Result<Vec<CityGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT v.id, v.name, v.city, v.state,
                    (SELECT COUNT(*) FROM shows s
                     WHERE s.venue_id = v.id AND s.start_time > ?1)
             FROM venues v
             ORDER BY v.city, v.state, v.id",
        )?;
        let rows = stmt.query_map(params![timestamp(now)], |row| {
            Ok((
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                VenueSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    num_upcoming_shows: row.get(4)?,
                },
            ))
        })?;

        let mut groups: Vec<CityGroup> = Vec::new();
        for row in rows {
            let (city, state, venue) = row?;
            match groups.last_mut() {
                Some(group) if group.city == city && group.state == state => {
                    group.venues.push(venue);
                }
                _ => groups.push(CityGroup {
                    city,
                    state,
                    venues: vec![venue],
                }),
            }
        }
        Ok(groups)
    }

    pub fn search_venues(&self, term: &str) -> Result<SearchResults> {
        self.search_names("venues", term)
    }

    pub fn get_venue(&self, id: i64) -> Result<Venue> {
        self.conn
            .query_row(
                "SELECT id, name, city, state, address, phone, image_link, genres,
                        facebook_link, website, seeking_talent, seeking_description
                 FROM venues WHERE id = ?1",
                params![id],
                venue_from_row,
            )
            .optional()?
            .ok_or_else(|| DirectoryError::not_found(Entity::Venue, id))
    }

    /// Full venue record plus its shows split into past and upcoming
    /// relative to `now`, each annotated with the artist's name and image.
    pub fn venue_detail(&self, id: i64, now: DateTime<Utc>) -> Result<VenueDetail> {
        let venue = self.get_venue(id)?;
        let mut stmt = self.conn.prepare(
            "SELECT s.artist_id, a.name, a.image_link, s.start_time
             FROM shows s JOIN artists a ON a.id = s.artist_id
             WHERE s.venue_id = ?1
             ORDER BY s.start_time",
        )?;
        let rows = stmt.query_map(params![id], |row| {
            Ok(ShowWithArtist {
                artist_id: row.get(0)?,
                artist_name: row.get(1)?,
                artist_image_link: row.get(2)?,
                start_time: row.get(3)?,
            })
        })?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for row in rows {
            let show = row?;
            if show.start_time > now {
                upcoming_shows.push(show);
            } else {
                past_shows.push(show);
            }
        }
        Ok(VenueDetail {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            venue,
            past_shows,
            upcoming_shows,
        })
    }

    pub fn create_venue(&mut self, form: &VenueForm) -> Result<i64> {
        form.validate()?;
        let tx = self.conn.transaction()?;
        let id = insert_venue(&tx, form).map_err(|err| {
            error!(%err, name = %form.name, "venue insert rolled back");
            err
        })?;
        tx.commit()?;
        debug!(id, name = %form.name, "venue created");
        Ok(id)
    }

    pub fn update_venue(&mut self, id: i64, form: &VenueForm) -> Result<()> {
        form.validate()?;
        let tx = self.conn.transaction()?;
        let changed = update_venue_row(&tx, id, form).map_err(|err| {
            error!(%err, id, "venue update rolled back");
            err
        })?;
        if changed == 0 {
            return Err(DirectoryError::not_found(Entity::Venue, id));
        }
        tx.commit()?;
        debug!(id, "venue updated");
        Ok(())
    }

    /// Deletion is rejected while dependent shows exist: the foreign key on
    /// `shows.venue_id` is RESTRICT, so the constraint violation rolls the
    /// transaction back and surfaces as a persistence failure.
    pub fn delete_venue(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let deleted = tx
            .execute("DELETE FROM venues WHERE id = ?1", params![id])
            .map_err(|err| {
                error!(%err, id, "venue delete rolled back");
                err
            })?;
        if deleted == 0 {
            return Err(DirectoryError::not_found(Entity::Venue, id));
        }
        tx.commit()?;
        debug!(id, "venue deleted");
        Ok(())
    }

    //  Artists
    //  ----------------------------------------------------------------

    pub fn list_artists(&self) -> Result<Vec<NameRef>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM artists ORDER BY name, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(NameRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn search_artists(&self, term: &str) -> Result<SearchResults> {
        self.search_names("artists", term)
    }

    pub fn get_artist(&self, id: i64) -> Result<Artist> {
        self.conn
            .query_row(
                "SELECT id, name, city, state, phone, genres, image_link, website,
                        facebook_link, seeking_venue, seeking_description
                 FROM artists WHERE id = ?1",
                params![id],
                artist_from_row,
            )
            .optional()?
            .ok_or_else(|| DirectoryError::not_found(Entity::Artist, id))
    }

    pub fn artist_detail(&self, id: i64, now: DateTime<Utc>) -> Result<ArtistDetail> {
        let artist = self.get_artist(id)?;
        let mut stmt = self.conn.prepare(
            "SELECT s.venue_id, v.name, v.image_link, s.start_time
             FROM shows s JOIN venues v ON v.id = s.venue_id
             WHERE s.artist_id = ?1
             ORDER BY s.start_time",
        )?;
        let rows = stmt.query_map(params![id], |row| {
            Ok(ShowWithVenue {
                venue_id: row.get(0)?,
                venue_name: row.get(1)?,
                venue_image_link: row.get(2)?,
                start_time: row.get(3)?,
            })
        })?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for row in rows {
            let show = row?;
            if show.start_time > now {
                upcoming_shows.push(show);
            } else {
                past_shows.push(show);
            }
        }
        Ok(ArtistDetail {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            artist,
            past_shows,
            upcoming_shows,
        })
    }

    pub fn create_artist(&mut self, form: &ArtistForm) -> Result<i64> {
        form.validate()?;
        let tx = self.conn.transaction()?;
        let id = insert_artist(&tx, form).map_err(|err| {
            error!(%err, name = %form.name, "artist insert rolled back");
            err
        })?;
        tx.commit()?;
        debug!(id, name = %form.name, "artist created");
        Ok(id)
    }

    pub fn update_artist(&mut self, id: i64, form: &ArtistForm) -> Result<()> {
        form.validate()?;
        let tx = self.conn.transaction()?;
        let changed = update_artist_row(&tx, id, form).map_err(|err| {
            error!(%err, id, "artist update rolled back");
            err
        })?;
        if changed == 0 {
            return Err(DirectoryError::not_found(Entity::Artist, id));
        }
        tx.commit()?;
        debug!(id, "artist updated");
        Ok(())
    }

    //  Shows
    //  ----------------------------------------------------------------

    pub fn list_shows(&self) -> Result<Vec<ShowWithNames>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.venue_id, v.name, s.artist_id, a.name, a.image_link, s.start_time
             FROM shows s
             JOIN venues v ON v.id = s.venue_id
             JOIN artists a ON a.id = s.artist_id
             ORDER BY s.start_time, s.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ShowWithNames {
                venue_id: row.get(0)?,
                venue_name: row.get(1)?,
                artist_id: row.get(2)?,
                artist_name: row.get(3)?,
                artist_image_link: row.get(4)?,
                start_time: row.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn get_show(&self, id: i64) -> Result<Show> {
        self.conn
            .query_row(
                "SELECT id, artist_id, venue_id, start_time FROM shows WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Show {
                        id: row.get(0)?,
                        artist_id: row.get(1)?,
                        venue_id: row.get(2)?,
                        start_time: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| DirectoryError::not_found(Entity::Show, id))
    }

    pub fn create_show(&mut self, form: &ShowForm) -> Result<i64> {
        form.validate()?;
        let tx = self.conn.transaction()?;
        if !row_exists(&tx, "artists", form.artist_id)? {
            return Err(DirectoryError::not_found(Entity::Artist, form.artist_id));
        }
        if !row_exists(&tx, "venues", form.venue_id)? {
            return Err(DirectoryError::not_found(Entity::Venue, form.venue_id));
        }
        let id = insert_show(&tx, form).map_err(|err| {
            error!(%err, "show insert rolled back");
            err
        })?;
        tx.commit()?;
        debug!(id, artist_id = form.artist_id, venue_id = form.venue_id, "show created");
        Ok(id)
    }

    fn search_names(&self, table: &str, term: &str) -> Result<SearchResults> {
        // a blank term would otherwise become the match-all pattern `%%`
        if term.trim().is_empty() {
            return Ok(SearchResults {
                count: 0,
                data: Vec::new(),
            });
        }
        let sql = format!(
            "SELECT id, name FROM {table} WHERE name LIKE ?1 ESCAPE '\\' ORDER BY name, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![like_pattern(term)], |row| {
            Ok(NameRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }
}

/// Fixed-width RFC3339 UTC, so SQL string comparison agrees with
/// chronological order.
fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Case-insensitive substring pattern; `%`, `_` and `\` in the term are
/// matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn genres_json(genres: &[String]) -> String {
    serde_json::to_string(genres).expect("genre serialization")
}

fn genres_from_json(raw: String) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(&raw).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(
            raw.len(),
            rusqlite::types::Type::Text,
            Box::new(err),
        )
    })
}

fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        image_link: row.get(6)?,
        genres: genres_from_json(row.get(7)?)?,
        facebook_link: row.get(8)?,
        website: row.get(9)?,
        seeking_talent: row.get(10)?,
        seeking_description: row.get(11)?,
    })
}

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        phone: row.get(4)?,
        genres: genres_from_json(row.get(5)?)?,
        image_link: row.get(6)?,
        website: row.get(7)?,
        facebook_link: row.get(8)?,
        seeking_venue: row.get(9)?,
        seeking_description: row.get(10)?,
    })
}

fn row_exists(tx: &Transaction<'_>, table: &str, id: i64) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
    let found = tx
        .query_row(&sql, params![id], |_| Ok(()))
        .optional()?
        .is_some();
    Ok(found)
}

fn insert_venue(tx: &Transaction<'_>, form: &VenueForm) -> rusqlite::Result<i64> {
    tx.execute(
        "INSERT INTO venues (name, city, state, address, phone, image_link, genres,
                             facebook_link, website, seeking_talent, seeking_description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            form.name,
            form.city,
            form.state,
            form.address,
            form.phone,
            form.image_link,
            genres_json(&form.genres),
            form.facebook_link,
            form.website,
            form.seeking_talent,
            form.seeking_description,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn update_venue_row(tx: &Transaction<'_>, id: i64, form: &VenueForm) -> rusqlite::Result<usize> {
    tx.execute(
        "UPDATE venues SET name = ?2, city = ?3, state = ?4, address = ?5, phone = ?6,
                           image_link = ?7, genres = ?8, facebook_link = ?9, website = ?10,
                           seeking_talent = ?11, seeking_description = ?12
         WHERE id = ?1",
        params![
            id,
            form.name,
            form.city,
            form.state,
            form.address,
            form.phone,
            form.image_link,
            genres_json(&form.genres),
            form.facebook_link,
            form.website,
            form.seeking_talent,
            form.seeking_description,
        ],
    )
}

fn insert_artist(tx: &Transaction<'_>, form: &ArtistForm) -> rusqlite::Result<i64> {
    tx.execute(
        "INSERT INTO artists (name, city, state, phone, genres, image_link, website,
                              facebook_link, seeking_venue, seeking_description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            form.name,
            form.city,
            form.state,
            form.phone,
            genres_json(&form.genres),
            form.image_link,
            form.website,
            form.facebook_link,
            form.seeking_venue,
            form.seeking_description,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

fn update_artist_row(tx: &Transaction<'_>, id: i64, form: &ArtistForm) -> rusqlite::Result<usize> {
    tx.execute(
        "UPDATE artists SET name = ?2, city = ?3, state = ?4, phone = ?5, genres = ?6,
                            image_link = ?7, website = ?8, facebook_link = ?9,
                            seeking_venue = ?10, seeking_description = ?11
         WHERE id = ?1",
        params![
            id,
            form.name,
            form.city,
            form.state,
            form.phone,
            genres_json(&form.genres),
            form.image_link,
            form.website,
            form.facebook_link,
            form.seeking_venue,
            form.seeking_description,
        ],
    )
}

fn insert_show(tx: &Transaction<'_>, form: &ShowForm) -> rusqlite::Result<i64> {
    tx.execute(
        "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?1, ?2, ?3)",
        params![form.artist_id, form.venue_id, timestamp(form.start_time)],
    )?;
    Ok(tx.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
        VenueForm {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "123 Main St".to_string(),
            phone: Some("555-1234".to_string()),
            image_link: Some("https://images.example.com/venue.jpg".to_string()),
            genres: vec!["Rock".to_string(), "Jazz".to_string()],
            facebook_link: None,
            website: Some("https://venue.example.com".to_string()),
            seeking_talent: true,
            seeking_description: Some("Looking for local acts".to_string()),
        }
    }

    fn artist_form(name: &str) -> ArtistForm {
        ArtistForm {
            name: name.to_string(),
            city: "Boise".to_string(),
            state: "ID".to_string(),
            phone: None,
            genres: vec!["Folk".to_string()],
            image_link: Some("https://images.example.com/artist.jpg".to_string()),
            website: None,
            facebook_link: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[test]
    fn venue_round_trips_all_fields() {
        let mut store = Store::open_in_memory().unwrap();
        let form = venue_form("The Fillmore", "San Francisco", "CA");
        let id = store.create_venue(&form).unwrap();

        let venue = store.get_venue(id).unwrap();
        assert_eq!(venue.name, form.name);
        assert_eq!(venue.city, form.city);
        assert_eq!(venue.state, form.state);
        assert_eq!(venue.address, form.address);
        assert_eq!(venue.phone, form.phone);
        assert_eq!(venue.image_link, form.image_link);
        assert_eq!(venue.genres, form.genres);
        assert_eq!(venue.facebook_link, form.facebook_link);
        assert_eq!(venue.website, form.website);
        assert_eq!(venue.seeking_talent, form.seeking_talent);
        assert_eq!(venue.seeking_description, form.seeking_description);
    }

    #[test]
    fn artist_round_trips_all_fields() {
        let mut store = Store::open_in_memory().unwrap();
        let form = artist_form("Guided by Voices");
        let id = store.create_artist(&form).unwrap();

        let artist = store.get_artist(id).unwrap();
        assert_eq!(artist.name, form.name);
        assert_eq!(artist.city, form.city);
        assert_eq!(artist.genres, form.genres);
        assert_eq!(artist.seeking_venue, form.seeking_venue);
    }

    #[test]
    fn get_missing_venue_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.get_venue(99).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_missing_venue_is_not_found() {
        let mut store = Store::open_in_memory().unwrap();
        let err = store
            .update_venue(99, &venue_form("Nowhere", "Reno", "NV"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_overwrites_every_mutable_field() {
        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .create_venue(&venue_form("Old Name", "Reno", "NV"))
            .unwrap();

        let mut edited = venue_form("New Name", "Las Vegas", "NV");
        edited.seeking_talent = false;
        edited.seeking_description = None;
        store.update_venue(id, &edited).unwrap();

        let venue = store.get_venue(id).unwrap();
        assert_eq!(venue.name, "New Name");
        assert_eq!(venue.city, "Las Vegas");
        assert!(!venue.seeking_talent);
        assert_eq!(venue.seeking_description, None);
    }

    #[test]
    fn create_rejects_invalid_form_before_touching_store() {
        let mut store = Store::open_in_memory().unwrap();
        let err = store
            .create_venue(&VenueForm::default())
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
        assert!(store.list_venue_groups(Utc::now()).unwrap().is_empty());
    }

    #[test]
    fn delete_venue_without_shows_succeeds() {
        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .create_venue(&venue_form("Short Lived", "Austin", "TX"))
            .unwrap();
        store.delete_venue(id).unwrap();
        assert!(store.get_venue(id).unwrap_err().is_not_found());
    }

    #[test]
    fn delete_venue_with_dependent_shows_is_rejected() {
        let mut store = Store::open_in_memory().unwrap();
        let venue_id = store
            .create_venue(&venue_form("Booked Solid", "Austin", "TX"))
            .unwrap();
        let artist_id = store.create_artist(&artist_form("The Regulars")).unwrap();
        store
            .create_show(&ShowForm {
                artist_id,
                venue_id,
                start_time: Utc::now() + Duration::days(3),
            })
            .unwrap();

        let err = store.delete_venue(venue_id).unwrap_err();
        assert!(matches!(err, DirectoryError::Persistence(_)));
        // rolled back: the venue is still there
        assert_eq!(store.get_venue(venue_id).unwrap().name, "Booked Solid");
    }

    #[test]
    fn delete_missing_venue_is_not_found() {
        let mut store = Store::open_in_memory().unwrap();
        assert!(store.delete_venue(1).unwrap_err().is_not_found());
    }

    #[test]
    fn create_show_requires_existing_artist_and_venue() {
        let mut store = Store::open_in_memory().unwrap();
        let venue_id = store
            .create_venue(&venue_form("Lonely Hall", "Omaha", "NE"))
            .unwrap();

        let err = store
            .create_show(&ShowForm {
                artist_id: 42,
                venue_id,
                start_time: Utc::now(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "no artist with id 42");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .create_venue(&venue_form("The Fillmore", "San Francisco", "CA"))
            .unwrap();
        store
            .create_venue(&venue_form("Fillmore East", "New York", "NY"))
            .unwrap();
        store
            .create_venue(&venue_form("Red Rocks", "Morrison", "CO"))
            .unwrap();

        let results = store.search_venues("fill").unwrap();
        assert_eq!(results.count, 2);
        assert_eq!(results.data[0].name, "Fillmore East");
        assert_eq!(results.data[1].name, "The Fillmore");
    }

    #[test]
    fn search_escapes_like_metacharacters() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .create_venue(&venue_form("100% Jazz", "New Orleans", "LA"))
            .unwrap();
        store
            .create_venue(&venue_form("1000 Watts", "New Orleans", "LA"))
            .unwrap();

        let results = store.search_venues("0% j").unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "100% Jazz");
    }

    #[test]
    fn blank_search_term_matches_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .create_venue(&venue_form("The Fillmore", "San Francisco", "CA"))
            .unwrap();

        for term in ["", "   "] {
            let results = store.search_venues(term).unwrap();
            assert_eq!(results.count, 0, "term {term:?} should match nothing");
            assert!(results.data.is_empty());
        }
    }

    #[test]
    fn show_round_trips_after_create() {
        let mut store = Store::open_in_memory().unwrap();
        let venue_id = store
            .create_venue(&venue_form("Round Trip Hall", "Boise", "ID"))
            .unwrap();
        let artist_id = store.create_artist(&artist_form("Returning Act")).unwrap();
        let start_time = Utc::now()
            .with_nanosecond(0)
            .expect("zero nanoseconds is valid")
            + Duration::days(10);
        let id = store
            .create_show(&ShowForm {
                artist_id,
                venue_id,
                start_time,
            })
            .unwrap();

        let show = store.get_show(id).unwrap();
        assert_eq!(show.id, id);
        assert_eq!(show.artist_id, artist_id);
        assert_eq!(show.venue_id, venue_id);
        assert_eq!(show.start_time, start_time);
    }

    #[test]
    fn get_missing_show_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.get_show(7).unwrap_err();
        assert_eq!(err.to_string(), "no show with id 7");
    }

    #[test]
    fn search_with_no_match_returns_empty_count_zero() {
        let store = Store::open_in_memory().unwrap();
        let results = store.search_artists("nobody").unwrap();
        assert_eq!(results.count, 0);
        assert!(results.data.is_empty());
    }

    #[test]
    fn show_starting_exactly_now_is_past() {
        let mut store = Store::open_in_memory().unwrap();
        let venue_id = store
            .create_venue(&venue_form("Borderline", "Denver", "CO"))
            .unwrap();
        let artist_id = store.create_artist(&artist_form("Edge Case")).unwrap();
        // timestamps are stored at whole-second precision
        let now = Utc::now()
            .with_nanosecond(0)
            .expect("zero nanoseconds is valid");
        store
            .create_show(&ShowForm {
                artist_id,
                venue_id,
                start_time: now,
            })
            .unwrap();

        let detail = store.venue_detail(venue_id, now).unwrap();
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 0);
    }

    #[test]
    fn past_and_upcoming_partition_all_shows() {
        let mut store = Store::open_in_memory().unwrap();
        let venue_id = store
            .create_venue(&venue_form("The Catalog", "Portland", "OR"))
            .unwrap();
        let artist_id = store.create_artist(&artist_form("Completionist")).unwrap();
        let now = Utc::now();
        for offset in [-30, -7, -1, 1, 7, 30] {
            store
                .create_show(&ShowForm {
                    artist_id,
                    venue_id,
                    start_time: now + Duration::days(offset),
                })
                .unwrap();
        }

        let detail = store.venue_detail(venue_id, now).unwrap();
        assert_eq!(detail.past_shows_count, 3);
        assert_eq!(detail.upcoming_shows_count, 3);
        assert_eq!(
            detail.past_shows.len() + detail.upcoming_shows.len(),
            store.list_shows().unwrap().len()
        );
    }
}
