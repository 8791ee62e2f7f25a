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

//! Transformer registry: named generators producing synthetic replacement
//! values.
//!
//! The set of transformers is closed. Policies name them by string and are
//! resolved through [`Transformer::from_str`] once, when the policy is
//! loaded, so an unknown name never reaches the rewrite stage.

mod emails;

pub use self::emails::{unique_email, UsedEmails, MAX_EMAIL_ATTEMPTS};

use crate::ast::Value;
use crate::faker::{address, business, date, identity, internet, lorem, person};
use chrono::{Local, NaiveDateTime};
use md5::{Digest, Md5};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

macro_rules! transformers {
    ($($(#[$doc:meta])* $variant:ident => $name:expr,)*) => {
        /// A named generator for one kind of field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Transformer {
            $($(#[$doc])* $variant,)*
        }

        impl Transformer {
            /// Every registered transformer, in registry order.
            pub const ALL: &'static [Transformer] = &[$(Transformer::$variant,)*];

            /// The name policies refer to this transformer by.
            pub fn name(self) -> &'static str {
                match self {
                    $(Transformer::$variant => $name,)*
                }
            }
        }
    };
}

transformers! {
    Username => "username",
    /// Hex MD5 digest of a random passphrase, never the passphrase itself
    Password => "password",
    /// Unique for the lifetime of the [`UsedEmails`] set
    Email => "email",
    Url => "url",
    Name => "name",
    FirstName => "firstName",
    LastName => "lastName",
    PersonPrefix => "personPrefix",
    PersonTitle => "personTitle",
    PhoneNumber => "phoneNumber",
    /// First name, last name, address, country code, email and phone joined by spaces
    BillingAddressFull => "billingAddressFull",
    AddressFull => "addressFull",
    AddressStreet => "addressStreet",
    AddressSecondary => "addressSecondary",
    AddressCity => "addressCity",
    AddressState => "addressState",
    AddressPostCode => "addressPostCode",
    AddressCountry => "addressCountry",
    AddressCountryCode => "addressCountryCode",
    Paragraph => "paragraph",
    ShortString => "shortString",
    Ipv4 => "ipv4",
    CompanyName => "companyName",
    CompanySuffix => "companySuffix",
    CompanyNumber => "companyNumber",
    CreditCardNumber => "creditCardNumber",
    CreditCardExpiryDate => "creditCardExpiryDate",
    CreditCardType => "creditCardType",
    NorwegianSsn => "norwegianSSN",
    /// Within eleven years of now, in either direction
    WpDateTime => "WPDateTime",
    /// Within eleven years after now
    WpFutureDateTime => "WPFutureDateTime",
    /// Always the empty string
    Purge => "purge",
    SpanishDni => "spanishDNI",
}

/// The name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransformer(pub String);

impl fmt::Display for UnknownTransformer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown transformer '{}'", self.0)
    }
}

impl std::error::Error for UnknownTransformer {}

impl FromStr for Transformer {
    type Err = UnknownTransformer;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Transformer::ALL
            .iter()
            .copied()
            .find(|transformer| transformer.name() == name)
            .ok_or_else(|| UnknownTransformer(name.to_string()))
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Transformer {
    /// Replacement for `value`, using the thread's random generator and the
    /// local clock.
    pub fn apply(self, value: &Value, emails: &UsedEmails) -> Value {
        let now = Local::now().naive_local();
        self.generate(value, &mut rand::thread_rng(), now, emails)
    }

    /// Replacement for `value` drawn from `rng`. Only [`Transformer::Email`]
    /// touches `emails`.
    pub fn generate<R: Rng + ?Sized>(
        self,
        _value: &Value,
        rng: &mut R,
        now: NaiveDateTime,
        emails: &UsedEmails,
    ) -> Value {
        let text = match self {
            Transformer::Username => internet::username(rng),
            Transformer::Password => {
                let digest = Md5::digest(internet::password(rng, 8, 14).as_bytes());
                hex::encode(digest)
            }
            Transformer::Email => unique_email(rng, emails),
            Transformer::Url => internet::url(rng),
            Transformer::Name => person::name(rng),
            Transformer::FirstName => person::first_name(rng),
            Transformer::LastName => person::last_name(rng),
            Transformer::PersonPrefix => person::prefix(rng),
            Transformer::PersonTitle => person::title(rng),
            Transformer::PhoneNumber => person::cell_phone(rng),
            Transformer::BillingAddressFull => [
                person::first_name(rng),
                person::last_name(rng),
                address::full(rng),
                address::country_code(rng),
                internet::safe_email(rng),
                person::cell_phone(rng),
            ]
            .join(" "),
            Transformer::AddressFull => address::full(rng),
            Transformer::AddressStreet => address::street_address(rng),
            Transformer::AddressSecondary => address::secondary_address(rng),
            Transformer::AddressCity => address::city(rng),
            Transformer::AddressState => address::state(rng),
            Transformer::AddressPostCode => address::postcode(rng),
            Transformer::AddressCountry => address::country(rng),
            Transformer::AddressCountryCode => address::country_code(rng),
            Transformer::Paragraph => lorem::sentence(rng, 3),
            Transformer::ShortString => lorem::characters(rng, 30),
            Transformer::Ipv4 => internet::ipv4(rng),
            Transformer::CompanyName => business::company_name(rng),
            Transformer::CompanySuffix => business::company_suffix(rng),
            Transformer::CompanyNumber => business::number(rng, 9),
            Transformer::CreditCardNumber => business::credit_card_number(rng),
            Transformer::CreditCardExpiryDate => business::credit_card_expiry_date(rng, now.date()),
            Transformer::CreditCardType => business::credit_card_type(rng),
            Transformer::NorwegianSsn => {
                let birth = date::birthday(rng, now.date(), 18, 90);
                identity::norwegian_ssn(rng, birth)
            }
            Transformer::WpDateTime => date::date_time_around(rng, now)
                .format(date::DATE_TIME_FORMAT)
                .to_string(),
            Transformer::WpFutureDateTime => date::future_date_time(rng, now)
                .format(date::DATE_TIME_FORMAT)
                .to_string(),
            Transformer::Purge => String::new(),
            Transformer::SpanishDni => identity::spanish_dni(rng),
        };

        Value::string(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::seeded;
    use chrono::NaiveDate;
    use matches::assert_matches;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn generate(transformer: Transformer) -> String {
        let mut rng = seeded();
        let value = transformer.generate(&Value::Null, &mut rng, now(), &UsedEmails::new());
        value.text().unwrap()
    }

    #[test]
    fn registry_names_round_trip() {
        assert_eq!(Transformer::ALL.len(), 33);
        for transformer in Transformer::ALL {
            assert_eq!(transformer.name().parse::<Transformer>(), Ok(*transformer));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_matches!("fullName".parse::<Transformer>(), Err(UnknownTransformer(_)));
        assert_matches!("Email".parse::<Transformer>(), Err(_));
    }

    #[test]
    fn password_is_a_digest() {
        let digest = generate(Transformer::Password);
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn purge_blanks() {
        let value = Transformer::Purge.apply(&Value::string("secret"), &UsedEmails::new());
        assert_eq!(value, Value::SingleQuotedString(String::new()));
        assert_eq!(value.to_string(), "''");
    }

    #[test]
    fn billing_address_has_all_parts() {
        let billing = generate(Transformer::BillingAddressFull);
        assert!(!billing.starts_with(' '));
        assert!(billing.contains('@'));
        assert!(billing.split(' ').count() >= 8);
    }

    #[test]
    fn date_time_format() {
        for transformer in &[Transformer::WpDateTime, Transformer::WpFutureDateTime] {
            let text = generate(*transformer);
            assert!(NaiveDateTime::parse_from_str(&text, date::DATE_TIME_FORMAT).is_ok());
        }
        let future = generate(Transformer::WpFutureDateTime);
        let parsed = NaiveDateTime::parse_from_str(&future, date::DATE_TIME_FORMAT).unwrap();
        assert!(parsed >= now());
    }

    #[test]
    fn email_transformer_never_repeats() {
        let used = UsedEmails::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let value = Transformer::Email.apply(&Value::Null, &used);
            assert!(seen.insert(value.text().unwrap()));
        }
    }

    #[test]
    fn every_transformer_produces_a_string_literal() {
        let used = UsedEmails::new();
        for transformer in Transformer::ALL {
            let value = transformer.apply(&Value::Number("1".to_string()), &used);
            assert_matches!(value, Value::SingleQuotedString(_));
        }
    }
}
