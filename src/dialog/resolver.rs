//! Dialog turn resolution
//!
//! Given the intent, this turn's slots and the session snapshot, decide what
//! to ask next or produce the final answer. At most two lookups are awaited,
//! strictly in order: location first, forecast only once a location is known.
//! Lookups are never retried; a failed call ends the session with an apology.

use super::directive::{self, TurnDirective};
use super::{
    decide, resolve_date, resolve_today, Intent, InvalidIntent, ResolvedDate, ResolvedLocation,
    SessionState, SlotInput,
};
use crate::weather::WeatherLookups;
use chrono::NaiveDate;

/// Per-turn facts supplied by the host
#[derive(Debug, Clone, Copy)]
pub struct TurnContext {
    /// Calendar date that "today" refers to
    pub today: NaiveDate,
}

impl TurnContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// Outcome of looking up a city slot
enum CityLookup {
    Resolved(ResolvedLocation),
    /// No value given, or the geocoder knows no such place
    Unrecognized(Option<String>),
    /// The geocoder itself failed
    Unavailable,
}

/// Resolve one turn.
///
/// Only an unrecognized intent name is an error; every other outcome,
/// including failed lookups, is a directive.
pub async fn resolve_turn<L: WeatherLookups + ?Sized>(
    ctx: &TurnContext,
    intent_name: &str,
    slots: &SlotInput,
    session: &SessionState,
    lookups: &L,
) -> Result<TurnDirective, InvalidIntent> {
    let intent = Intent::from_name(intent_name)?;
    tracing::debug!(
        intent = ?intent,
        has_city = session.city.is_some(),
        has_date = session.date.is_some(),
        "Resolving turn"
    );

    let directive = match intent {
        Intent::OneShot => one_shot(ctx, slots, session, lookups).await,
        Intent::Dialog => dialog(ctx, slots, session, lookups).await,
        Intent::SupportedCities => directive::supported_cities(session.clone()),
        Intent::Help => directive::help(session.clone()),
        Intent::Stop => directive::goodbye(session.clone()),
    };
    Ok(directive)
}

async fn one_shot<L: WeatherLookups + ?Sized>(
    ctx: &TurnContext,
    slots: &SlotInput,
    session: &SessionState,
    lookups: &L,
) -> TurnDirective {
    let city = match lookup_city(slots.city(), lookups).await {
        CityLookup::Resolved(city) => city,
        CityLookup::Unrecognized(raw) => {
            return directive::unknown_city(raw.as_deref(), session.clone());
        }
        CityLookup::Unavailable => return directive::service_unavailable(session.clone()),
    };

    // One-shot never asks again for the date: an unusable one means today
    let date = match resolve_date(slots.date(), ctx.today) {
        Ok(date) => date,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring one-shot date, using today");
            resolve_today(ctx.today)
        }
    };

    forecast(&city, &date, session.clone(), lookups).await
}

async fn dialog<L: WeatherLookups + ?Sized>(
    ctx: &TurnContext,
    slots: &SlotInput,
    session: &SessionState,
    lookups: &L,
) -> TurnDirective {
    if let Some(raw_city) = slots.city() {
        return match lookup_city(Some(raw_city), lookups).await {
            CityLookup::Resolved(city) => {
                let updated = session.with_city(city.clone());
                match &session.date {
                    Some(date) => forecast(&city, date, updated, lookups).await,
                    None => directive::ask_date(&city, updated),
                }
            }
            CityLookup::Unrecognized(_) => directive::unknown_city_with_list(session.clone()),
            CityLookup::Unavailable => directive::service_unavailable(session.clone()),
        };
    }

    if let Some(raw_date) = slots.date() {
        return match resolve_date(Some(raw_date), ctx.today) {
            Ok(date) => {
                let updated = session.with_date(date.clone());
                match &session.city {
                    Some(city) => forecast(city, &date, updated, lookups).await,
                    None => directive::ask_city(&date, updated),
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Date slot not understood");
                directive::invalid_date(session.clone())
            }
        };
    }

    match &session.city {
        Some(city) => directive::ask_date(city, session.clone()),
        None => directive::supported_cities(session.clone()),
    }
}

async fn lookup_city<L: WeatherLookups + ?Sized>(raw: Option<&str>, lookups: &L) -> CityLookup {
    let Some(raw) = raw else {
        return CityLookup::Unrecognized(None);
    };

    match lookups.resolve_location(raw).await {
        Ok(Some(city)) => CityLookup::Resolved(city),
        Ok(None) => {
            tracing::debug!(city = %raw, "City not recognized");
            CityLookup::Unrecognized(Some(raw.to_string()))
        }
        Err(e) => {
            tracing::warn!(
                city = %raw,
                kind = e.kind.as_str(),
                "Location service unavailable, apologising"
            );
            CityLookup::Unavailable
        }
    }
}

async fn forecast<L: WeatherLookups + ?Sized>(
    city: &ResolvedLocation,
    date: &ResolvedDate,
    session: SessionState,
    lookups: &L,
) -> TurnDirective {
    match lookups.rain_chance(city, date).await {
        Ok(chance) => {
            let advice = decide(chance);
            directive::forecast_answer(city, date, chance, advice, session)
        }
        Err(e) => {
            tracing::warn!(
                city = %city.name,
                kind = e.kind.as_str(),
                "Forecast service unavailable, apologising"
            );
            directive::service_unavailable(session)
        }
    }
}
