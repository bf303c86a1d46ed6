mod civs;
mod elo;
mod help;
mod stop;
mod taunt;

use crate::{Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        elo::elo(),
        taunt::taunt(),
        taunt::t(),
        stop::stop(),
        civs::civs(),
    ]
}
