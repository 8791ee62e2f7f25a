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

pub fn street_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, STREET_NAMES), pick(rng, STREET_SUFFIXES))
}

pub fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.gen_range(1..10000);
    format!("{} {}", number, street_name(rng))
}

pub fn secondary_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let format = pick(rng, SECONDARY_ADDRESS_FORMATS);
    numerify(rng, format)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    let stem = pick(rng, STREET_NAMES);
    if rng.gen_bool(0.3) {
        format!("{} {}{}", pick(rng, CITY_PREFIXES), stem, pick(rng, CITY_SUFFIXES))
    } else {
        format!("{}{}", stem, pick(rng, CITY_SUFFIXES))
    }
}

pub fn state<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, STATES).to_string()
}

pub fn postcode<R: Rng + ?Sized>(rng: &mut R) -> String {
    let format = if rng.gen_bool(0.2) { "#####-####" } else { "#####" };
    numerify(rng, format)
}

pub fn country<R: Rng + ?Sized>(rng: &mut R) -> String {
    COUNTRIES[rng.gen_range(0..COUNTRIES.len())].0.to_string()
}

/// ISO 3166-1 alpha-2 code.
pub fn country_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    COUNTRIES[rng.gen_range(0..COUNTRIES.len())].1.to_string()
}

/// Street, optional secondary line, city, state and postcode on one line.
pub fn full<R: Rng + ?Sized>(rng: &mut R) -> String {
    let street = if rng.gen_bool(0.25) {
        format!("{} {}", street_address(rng), secondary_address(rng))
    } else {
        street_address(rng)
    };
    format!("{}, {}, {} {}", street, city(rng), state(rng), postcode(rng))
}
