//! Race Entry Form, modeled as an explicit state object with pure
//! transitions. The original dialog kept this state in component hooks and
//! swallowed transport failures; here every outcome lands back in the state
//! as an explicit [`SubmitError`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NewRace, ScoringRule};

/// The pool/owner/horse a page path points at. The form can only submit
/// when all three resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteParams {
    pub rule: ScoringRule,
    pub owner_id: i32,
    pub horse_id: i32,
}

impl RouteParams {
    /// Parse a horse detail path: `/<season>/<rule>/<ownerId>/<horseId>`.
    /// Anything shallower (season index, owner listing) has no target horse
    /// and yields `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let mut parts = path.trim_matches('/').split('/');
        let _season = parts.next().filter(|s| !s.is_empty())?;
        let rule = ScoringRule::from_db_str(parts.next()?)?;
        let owner_id = parts.next()?.parse().ok()?;
        let horse_id = parts.next()?.parse().ok()?;
        Some(Self {
            rule,
            owner_id,
            horse_id,
        })
    }
}

/// Why a submission attempt failed. Mirrors the server's error taxonomy so
/// the dialog can tell the organizer what actually happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitError {
    Validation(String),
    Persistence(String),
    /// The row was persisted but page regeneration failed; retrying the
    /// submission would duplicate the row.
    Regeneration(String),
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Closed,
}

/// Form state. Fields default to empty/zero and the date to "today" as
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceForm {
    pub route: Option<RouteParams>,
    pub race: String,
    pub odds: Decimal,
    pub point: Decimal,
    pub result: i32,
    pub date: NaiveDate,
    pub status: FormStatus,
    pub error: Option<SubmitError>,
}

impl RaceForm {
    pub fn open(path: &str, today: NaiveDate) -> Self {
        Self {
            route: RouteParams::parse(path),
            race: String::new(),
            odds: Decimal::ZERO,
            point: Decimal::ZERO,
            result: 0,
            date: today,
            status: FormStatus::Editing,
            error: None,
        }
    }

    pub fn set_race(mut self, race: impl Into<String>) -> Self {
        self.race = race.into();
        self
    }

    pub fn set_odds(mut self, odds: Decimal) -> Self {
        self.odds = odds;
        self
    }

    pub fn set_point(mut self, point: Decimal) -> Self {
        self.point = point;
        self
    }

    pub fn set_result(mut self, result: i32) -> Self {
        self.result = result;
        self
    }

    pub fn set_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// A submission needs a resolvable target horse, a race name, and a
    /// non-zero placing; and no request may already be in flight.
    pub fn can_submit(&self) -> bool {
        self.route.is_some()
            && !self.race.is_empty()
            && self.result != 0
            && self.status == FormStatus::Editing
    }

    /// The request body for the current field values. `None` when the form
    /// is not submittable.
    pub fn submission(&self) -> Option<NewRace> {
        if !self.can_submit() {
            return None;
        }
        let route = self.route?;
        Some(NewRace {
            race: self.race.clone(),
            odds: self.odds,
            point: self.point,
            result: self.result,
            horse_id: route.horse_id,
            date: self.date,
        })
    }

    pub fn submit_started(mut self) -> Self {
        self.status = FormStatus::Submitting;
        self.error = None;
        self
    }

    /// Success closes the dialog.
    pub fn submit_succeeded(mut self) -> Self {
        self.status = FormStatus::Closed;
        self.error = None;
        self
    }

    /// Failure keeps the dialog open with the error visible, fields intact.
    pub fn submit_failed(mut self, error: SubmitError) -> Self {
        self.status = FormStatus::Editing;
        self.error = Some(error);
        self
    }
}
