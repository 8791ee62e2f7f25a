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

//! Synthetic data generators.
//!
//! Every generator draws from the random number generator it is handed, so
//! tests can seed one and production code can use `rand::thread_rng()`.

pub mod address;
pub mod business;
mod data;
pub mod date;
pub mod identity;
pub mod internet;
pub mod lorem;
pub mod person;

use rand::Rng;

/// One element of a non-empty word list.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

/// Replace every `#` in `format` with a random digit.
pub(crate) fn numerify<R: Rng + ?Sized>(rng: &mut R, format: &str) -> String {
    format
        .chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.gen_range(0..10u8)),
            c => c,
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn seeded() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(432)
}
