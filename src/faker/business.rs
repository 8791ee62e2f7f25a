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
use super::{numerify, person, pick};
use chrono::{Duration, NaiveDate};
use rand::Rng;

pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", person::last_name(rng), company_suffix(rng)),
        1 => format!("{}-{}", person::last_name(rng), person::last_name(rng)),
        _ => format!(
            "{}, {} and {}",
            person::last_name(rng),
            person::last_name(rng),
            person::last_name(rng)
        ),
    }
}

pub fn company_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, COMPANY_SUFFIXES).to_string()
}

/// A number of exactly `digits` digits, leading zeros allowed.
pub fn number<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    numerify(rng, &"#".repeat(digits))
}

/// Card-shaped digits in groups of four. No Luhn check digit.
pub fn credit_card_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    numerify(rng, "####-####-####-####")
}

/// An expiry date up to four years after `today`.
pub fn credit_card_expiry_date<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> String {
    let expiry = today + Duration::days(rng.gen_range(0..365 * 4));
    expiry.format("%Y-%m-%d").to_string()
}

pub fn credit_card_type<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, CREDIT_CARD_TYPES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::seeded;

    #[test]
    fn company_numbers_have_nine_digits() {
        let mut rng = seeded();
        let value = number(&mut rng, 9);
        assert_eq!(value.len(), 9);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn expiry_is_not_in_the_past() {
        let mut rng = seeded();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        for _ in 0..20 {
            let expiry = credit_card_expiry_date(&mut rng, today);
            let parsed = NaiveDate::parse_from_str(&expiry, "%Y-%m-%d").unwrap();
            assert!(parsed >= today);
        }
    }
}
