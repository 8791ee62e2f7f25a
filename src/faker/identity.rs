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

//! National identifiers.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Check letters of the Spanish DNI, indexed by `number % 23`.
pub const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

const NO_CONTROL_WEIGHTS_1: [u32; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];
const NO_CONTROL_WEIGHTS_2: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Eight zero-padded digits followed by their check letter.
pub fn spanish_dni<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.gen_range(0..99_999_999u32);
    let letter = char::from(DNI_LETTERS[(number % 23) as usize]);
    format!("{:08}{}", number, letter)
}

/// An eleven digit Norwegian national identity number for `birth`: date as
/// DDMMYY, three individual digits from the range tied to the birth century,
/// and two mod-11 control digits.
pub fn norwegian_ssn<R: Rng + ?Sized>(rng: &mut R, birth: NaiveDate) -> String {
    let year = birth.year();
    let individual = match year {
        1854..=1899 => 500..=749u32,
        2000..=2039 => 500..=999,
        _ => 0..=499,
    };

    loop {
        let base = format!(
            "{:02}{:02}{:02}{:03}",
            birth.day(),
            birth.month(),
            year.rem_euclid(100),
            rng.gen_range(individual.clone())
        );
        // Some individual numbers have no valid control digit; draw again.
        if let Some(control) = control_digits(&base) {
            return format!("{}{}", base, control);
        }
    }
}

fn control_digits(base: &str) -> Option<String> {
    let mut digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    let first = mod11(&digits, &NO_CONTROL_WEIGHTS_1)?;
    digits.push(first);
    let second = mod11(&digits, &NO_CONTROL_WEIGHTS_2)?;
    Some(format!("{}{}", first, second))
}

fn mod11(digits: &[u32], weights: &[u32]) -> Option<u32> {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match 11 - sum % 11 {
        11 => Some(0),
        10 => None,
        k => Some(k),
    }
}
