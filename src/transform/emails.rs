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

use crate::faker::internet;
use log::debug;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Mutex;

/// Rounds of the three generation strategies before falling back to
/// numbered addresses.
pub const MAX_EMAIL_ATTEMPTS: usize = 32;

/// Emails handed out so far in a run, shared by every rewrite task.
#[derive(Debug, Default)]
pub struct UsedEmails {
    claimed: Mutex<HashSet<String>>,
}

impl UsedEmails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `candidate` as used. Returns false, leaving the set unchanged,
    /// when it was already taken.
    pub fn claim(&self, candidate: &str) -> bool {
        let mut claimed = self
            .claimed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if claimed.contains(candidate) {
            return false;
        }
        claimed.insert(candidate.to_string())
    }

    pub fn len(&self) -> usize {
        self.claimed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An email address no earlier call with the same `used` set returned.
pub fn unique_email<R: Rng + ?Sized>(rng: &mut R, used: &UsedEmails) -> String {
    let mut last = String::new();
    for _ in 0..MAX_EMAIL_ATTEMPTS {
        let candidates = [
            internet::safe_email(rng),
            internet::free_email(rng),
            internet::email(rng),
        ];
        for candidate in candidates.iter() {
            if used.claim(candidate) {
                return candidate.clone();
            }
        }
        last = candidates[2].clone();
    }

    debug!("email candidates exhausted, numbering {}", last);
    let (local, domain) = match last.find('@') {
        Some(at) => (&last[..at], &last[at + 1..]),
        None => (last.as_str(), "example.com"),
    };
    let mut n = 1u64;
    loop {
        let candidate = format!("{}.{}@{}", local, n, domain);
        if used.claim(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
