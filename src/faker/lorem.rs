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

use super::data::LOREM_WORDS;
use super::pick;
use rand::distributions::Alphanumeric;
use rand::Rng;

pub fn words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    (0..count).map(|_| pick(rng, LOREM_WORDS)).collect()
}

/// A capitalized sentence of `word_count` words plus up to three more.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, word_count: usize) -> String {
    let count = word_count + rng.gen_range(0..=3);
    let mut sentence = words(rng, count.max(1)).join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// `count` random lowercase alphanumeric characters.
pub fn characters<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect()
}
