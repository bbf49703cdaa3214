//! Turn directives and the canned speech behind them

use super::{Advice, RainChance, ResolvedDate, ResolvedLocation, SessionState};

/// Cities offered as examples when the user needs a hint
pub const SUPPORTED_CITIES: &[&str] = &[
    "Seattle",
    "Portland",
    "San Francisco",
    "Los Angeles",
    "Chicago",
    "New York",
    "Boston",
    "Miami",
];

const CARD_TITLE: &str = "Umbrella";

/// What to say and whether the conversation continues
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDirective {
    pub speech: String,
    pub reprompt: String,
    pub card_title: String,
    pub should_end_session: bool,
    pub session: SessionState,
}

impl TurnDirective {
    /// Ask something and keep the session open
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>, session: SessionState) -> Self {
        Self {
            speech: speech.into(),
            reprompt: reprompt.into(),
            card_title: CARD_TITLE.to_string(),
            should_end_session: false,
            session,
        }
    }

    /// Say something and end the session
    pub fn tell(speech: impl Into<String>, session: SessionState) -> Self {
        Self {
            speech: speech.into(),
            reprompt: String::new(),
            card_title: CARD_TITLE.to_string(),
            should_end_session: true,
            session,
        }
    }

    #[must_use]
    pub fn with_card_title(mut self, title: impl Into<String>) -> Self {
        self.card_title = title.into();
        self
    }
}

fn city_list() -> String {
    match SUPPORTED_CITIES.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, and {last}", rest.join(", ")),
        Some((last, _)) => (*last).to_string(),
        None => String::new(),
    }
}

pub fn welcome(session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        "Welcome to Umbrella. I can tell you whether to take an umbrella. Which city would you like to check?",
        "Which city would you like an umbrella forecast for?",
        session,
    )
}

pub fn help(session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        "I can tell you whether to take an umbrella in a city on a given day. \
         You can say, will it rain in Seattle tomorrow, or you can say supported cities. \
         Which city would you like?",
        "Which city would you like an umbrella forecast for?",
        session,
    )
}

pub fn supported_cities(session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        format!(
            "I can check the weather in most cities, for example {}. Which city would you like?",
            city_list()
        ),
        "Which city would you like an umbrella forecast for?",
        session,
    )
}

/// One-shot city that could not be resolved
pub fn unknown_city(raw: Option<&str>, session: SessionState) -> TurnDirective {
    let speech = match raw {
        Some(raw) => format!("I'm sorry, I don't recognize {raw} as a city. Which city would you like?"),
        None => "I'm sorry, I didn't catch the city. Which city would you like?".to_string(),
    };
    TurnDirective::ask(
        speech,
        format!("Please tell me a city, for example {}.", SUPPORTED_CITIES[0]),
        session,
    )
}

/// Dialog city that could not be resolved; offers the example list
pub fn unknown_city_with_list(session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        format!(
            "I'm sorry, I don't know that city. You can ask about {}. Which city would you like?",
            city_list()
        ),
        "Which city would you like an umbrella forecast for?",
        session,
    )
}

pub fn ask_date(city: &ResolvedLocation, session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        format!("For which day would you like the forecast in {}?", city.name),
        "For which day? You can say today, tomorrow, or a day like Saturday.",
        session,
    )
}

pub fn ask_city(date: &ResolvedDate, session: SessionState) -> TurnDirective {
    let when = match date.display_text.as_str() {
        "Today" | "Tomorrow" => date.display_text.to_lowercase(),
        other => format!("on {other}"),
    };
    TurnDirective::ask(
        format!("For which city would you like the forecast {when}?"),
        "Which city would you like an umbrella forecast for?",
        session,
    )
}

pub fn invalid_date(session: SessionState) -> TurnDirective {
    TurnDirective::ask(
        "I'm sorry, I didn't understand that date. For which day would you like the forecast? You can say a day like Saturday.",
        "For which day? You can say today, tomorrow, or a day like Saturday.",
        session,
    )
}

pub fn service_unavailable(session: SessionState) -> TurnDirective {
    TurnDirective::tell(
        "Sorry, the weather service is experiencing a problem. Please try again later.",
        session,
    )
}

pub fn goodbye(session: SessionState) -> TurnDirective {
    TurnDirective::tell("Goodbye", session)
}

/// The terminal answer
pub fn forecast_answer(
    city: &ResolvedLocation,
    date: &ResolvedDate,
    chance: RainChance,
    advice: Advice,
    session: SessionState,
) -> TurnDirective {
    TurnDirective::tell(
        format!(
            "{} in {}, there is a {} percent chance of rain. {}.",
            date.display_text,
            city.name,
            chance.percent(),
            advice.as_str()
        ),
        session,
    )
    .with_card_title(format!("{CARD_TITLE} - {}", city.name))
}
