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
use super::{person, pick};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Lowercase ASCII letters and digits only, as a mailbox or login needs.
fn slug(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn username<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = slug(&person::first_name(rng));
    match rng.gen_range(0..3) {
        0 => format!("{}.{}", first, slug(&person::last_name(rng))),
        1 => format!("{}_{}", first, slug(&person::last_name(rng))),
        _ => format!("{}{}", first, rng.gen_range(1..100)),
    }
}

pub fn domain_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, DOMAIN_WORDS).to_string()
}

pub fn domain_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}.{}", domain_word(rng), pick(rng, DOMAIN_SUFFIXES))
}

/// An address at one of the reserved example domains.
pub fn safe_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}@{}", username(rng), pick(rng, SAFE_EMAIL_DOMAINS))
}

/// An address at a free mail provider.
pub fn free_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}@{}", username(rng), pick(rng, FREE_EMAIL_DOMAINS))
}

/// An address at a random company-like domain.
pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}@{}", username(rng), domain_name(rng))
}

pub fn url<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("http://{}/{}", domain_name(rng), username(rng))
}

pub fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=254u8),
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen_range(1..=254u8)
    )
}

/// A plaintext password between `min` and `max` characters long.
pub fn password<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> String {
    let length = rng.gen_range(min..=max);
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::seeded;
    use rand::rngs::StdRng;

    #[test]
    fn emails_have_one_at_sign() {
        let mut rng = seeded();
        let generators: [fn(&mut StdRng) -> String; 3] = [safe_email, free_email, email];
        for generate in generators.iter() {
            for _ in 0..20 {
                let address = generate(&mut rng);
                assert_eq!(address.matches('@').count(), 1, "{}", address);
                assert!(!address.contains('\''));
            }
        }
    }

    #[test]
    fn password_length_is_bounded() {
        let mut rng = seeded();
        for _ in 0..50 {
            let len = password(&mut rng, 8, 14).len();
            assert!(len >= 8 && len <= 14);
        }
    }

    #[test]
    fn urls_use_http() {
        let mut rng = seeded();
        assert!(url(&mut rng).starts_with("http://"));
    }
}
