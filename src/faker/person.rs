// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::data::*;
use super::{numerify, pick};
use rand::Rng;

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, LAST_NAMES).to_string()
}

/// A full name, occasionally with a prefix or suffix.
pub fn name<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..10) {
        0 => format!("{} {} {}", prefix(rng), first_name(rng), last_name(rng)),
        1 => format!("{} {} {}", first_name(rng), last_name(rng), pick(rng, SUFFIXES)),
        _ => format!("{} {}", first_name(rng), last_name(rng)),
    }
}

pub fn prefix<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, PREFIXES).to_string()
}

/// A job title such as "Senior Integration Engineer".
pub fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, TITLE_DESCRIPTORS),
        pick(rng, TITLE_LEVELS),
        pick(rng, TITLE_JOBS)
    )
}

pub fn cell_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let format = pick(rng, PHONE_FORMATS);
    numerify(rng, format)
}
