//! Action resolution: the suit rule table, defense mitigation and discards.

pub mod effect;
pub mod resolver;

pub use effect::Effect;
pub use resolver::{
    resolve, ActionResolver, Applied, CardRule, Outcome, Play, Resolution, SubAction,
    ACE_DAMAGE, CLUBS_MULTIPLIER,
};
