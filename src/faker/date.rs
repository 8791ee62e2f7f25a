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

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

/// Format of WordPress `DATETIME` columns.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the window generated timestamps fall in, either side of now.
pub const WINDOW_SECONDS: i64 = 11 * 365 * 24 * 60 * 60;

/// A timestamp up to eleven years before or after `now`, direction chosen
/// uniformly at random.
pub fn date_time_around<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> NaiveDateTime {
    let offset = Duration::seconds(rng.gen_range(0..WINDOW_SECONDS));
    if rng.gen_bool(0.5) {
        now + offset
    } else {
        now - offset
    }
}

/// A timestamp up to eleven years after `now`.
pub fn future_date_time<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::seconds(rng.gen_range(0..WINDOW_SECONDS))
}

/// A birth date for someone between `min_age` and `max_age` years old.
pub fn birthday<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    min_age: i64,
    max_age: i64,
) -> NaiveDate {
    today - Duration::days(rng.gen_range(min_age * 365..max_age * 365))
}
