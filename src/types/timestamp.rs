// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::DateTime;
use chrono::Utc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Whole minutes elapsed between `self` and a later timestamp. Never
    /// negative.
    pub fn minutes_until(self, later: Timestamp) -> i64 {
        (later.0 - self.0).num_minutes().max(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_minutes_until() {
        let start = Utc::now();
        let a = Timestamp::new(start);
        let b = Timestamp::new(start + Duration::seconds(150));
        assert_eq!(a.minutes_until(b), 2);
        assert_eq!(b.minutes_until(a), 0);
    }
}
