//! Instant activation matching
//!
//! Greedy, first-hit phrase matching: commands are checked in registry order
//! and phrases in configured order, and the first phrase scoring above the
//! threshold wins. The fast path never waits for the language model.

use crate::commands::Command;
use crate::utils::fuzzy::similarity;
use tracing::{debug, info};

/// Similarity a phrase has to exceed to trigger its command
pub const INSTANT_THRESHOLD: f64 = 0.8;

/// Find the instant command a transcript activates, if any
pub fn match_instant<'a, I>(transcript: &str, commands: I) -> Option<&'a Command>
where
    I: IntoIterator<Item = &'a Command>,
{
    for command in commands {
        for phrase in &command.instant_phrases {
            let ratio = similarity(transcript, phrase);
            if ratio > INSTANT_THRESHOLD {
                info!(
                    "🎯 Instant match: {} (phrase: '{}', ratio {:.2})",
                    command.name, phrase, ratio
                );
                return Some(command);
            }
        }
    }

    debug!("No instant command matched for: '{}'", transcript);
    None
}
