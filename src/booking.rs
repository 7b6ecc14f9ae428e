//! Multi-step booking dialogue.
//!
//! A linear wizard: passenger name, contact email, payment details,
//! confirmation. Stages only move forward, at most one booking is in
//! progress per session, and empty input never advances a stage. Submitted
//! values are stored as-is; beyond non-emptiness nothing is validated,
//! which is a deliberate simulation gap.

use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Flight;

/// The stage whose input the wizard is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Passenger,
    Contact,
    Payment,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Contact => "contact",
            Self::Payment => "payment",
        }
    }
}

#[derive(Debug)]
pub enum WizardError {
    AlreadyInProgress,
    NotInProgress,
    EmptyInput(Stage),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInProgress => {
                write!(f, "a booking is already in progress — finish it first")
            }
            Self::NotInProgress => write!(f, "no booking in progress"),
            Self::EmptyInput(stage) => {
                write!(f, "please enter your {} details to continue", stage.name())
            }
        }
    }
}

impl std::error::Error for WizardError {}

/// Everything collected by the time the wizard completes.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub flight: Flight,
    pub passenger: String,
    pub contact: String,
    /// Short booking reference quoted back to the user.
    pub reference: String,
}

/// Result of a successful submission: either the prompt for the next stage,
/// or the completed booking.
#[derive(Debug)]
pub enum Advance {
    Prompt(String),
    Completed(Confirmation, String),
}

struct Active {
    flight: Flight,
    stage: Stage,
    data: BTreeMap<&'static str, String>,
}

// No ambiguous characters (0/O, 1/I) in booking references.
const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const REFERENCE_LEN: usize = 6;

/// One chat session's booking state.
pub struct Wizard {
    active: Option<Active>,
    rng: StdRng,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            active: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// A wizard whose booking references are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            active: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_reference(&mut self) -> String {
        (0..REFERENCE_LEN)
            .map(|_| {
                REFERENCE_CHARSET[self.rng.gen_range(0..REFERENCE_CHARSET.len())] as char
            })
            .collect()
    }

    pub fn in_progress(&self) -> bool {
        self.active.is_some()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.active.as_ref().map(|a| a.stage)
    }

    /// Start booking the given flight. Returns the passenger-stage prompt.
    pub fn begin(&mut self, flight: Flight) -> Result<String, WizardError> {
        if self.active.is_some() {
            return Err(WizardError::AlreadyInProgress);
        }
        let prompt = format!(
            "Great choice! Let's book flight {} with {} from {} to {}. \
             What is the passenger's full name?",
            flight.flight_number,
            flight.airline,
            flight.departure_airport_code,
            flight.arrival_airport_code,
        );
        self.active = Some(Active {
            flight,
            stage: Stage::Passenger,
            data: BTreeMap::new(),
        });
        Ok(prompt)
    }

    /// Feed the user's input to the current stage. Whitespace-only input is
    /// rejected and the stage does not advance.
    pub fn submit(&mut self, input: &str) -> Result<Advance, WizardError> {
        let active = self.active.as_mut().ok_or(WizardError::NotInProgress)?;
        let input = input.trim();
        if input.is_empty() {
            return Err(WizardError::EmptyInput(active.stage));
        }

        active.data.insert(active.stage.name(), input.to_string());

        match active.stage {
            Stage::Passenger => {
                active.stage = Stage::Contact;
                Ok(Advance::Prompt(format!(
                    "Thanks, {input}. What email address should the confirmation go to?"
                )))
            }
            Stage::Contact => {
                active.stage = Stage::Payment;
                Ok(Advance::Prompt(
                    "Almost done. Please enter your card details to complete the booking."
                        .to_string(),
                ))
            }
            Stage::Payment => {
                // Terminal stage: hand back the confirmation and reset, so the
                // session keeps no record of the completed booking.
                let reference = self.next_reference();
                let active = self.active.take().expect("checked above");
                let confirmation = Confirmation {
                    passenger: active.data.get("passenger").cloned().unwrap_or_default(),
                    contact: active.data.get("contact").cloned().unwrap_or_default(),
                    flight: active.flight,
                    reference,
                };
                let message = format!(
                    "Your booking is confirmed! Reference {}. Flight {} with {} departs {} at {}. \
                     A confirmation email is on its way to {}.",
                    confirmation.reference,
                    confirmation.flight.flight_number,
                    confirmation.flight.airline,
                    confirmation.flight.departure_airport_code,
                    confirmation.flight.departure_time,
                    confirmation.contact,
                );
                Ok(Advance::Completed(confirmation, message))
            }
        }
    }
}
