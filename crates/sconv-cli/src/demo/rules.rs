//! Mapping rules between the demo DTOs and domain types.

use sconv_core::{RuleDefinition, RuleGroup, RuleSet};

use super::domain::{AddressDomain, MovieDomain, UserDomain, UserInfoDomain};
use super::dto::{AddressDto, MovieDto, UserDto, UserInfoDto};

/// Top-level user rules, registered on their own.
pub fn user_rules() -> RuleDefinition {
    RuleDefinition::from_exemplars(
        &UserDto::default(),
        &UserDomain::default(),
        RuleSet::new()
            .rename("id", "user_id")
            .rename("name", "user_name")
            .ignore("password")
            .rename("info", "user_info")
            .rename("top_movies", "top_5_movies")
            .compute("greeting", greeting),
    )
}

fn greeting(salutation: String, user: UserDto, pi: f64) -> String {
    format!("{salutation}, {}! pi is {pi}", user.user_name)
}

/// Rules for the nested types.
pub struct NestedRules;

impl RuleGroup for NestedRules {
    fn name(&self) -> &str {
        "nested"
    }

    fn rule_definitions(&self) -> Vec<RuleDefinition> {
        vec![
            RuleDefinition::between::<UserInfoDto, UserInfoDomain>(RuleSet::new().compute(
                "full_name",
                |info: UserInfoDto| format!("{} {}", info.first_name, info.last_name),
            )),
            RuleDefinition::between::<AddressDto, AddressDomain>(
                RuleSet::new()
                    .rename("is_primary", "primary")
                    .compute("summary", |address: AddressDto, user: UserDto| {
                        format!(
                            "{} {}, {} ({})",
                            address.number, address.street, address.city, user.user_name
                        )
                    }),
            ),
            RuleDefinition::between::<MovieDto, MovieDomain>(RuleSet::new().compute(
                "description",
                |movie: MovieDto, first: String, second: String| {
                    format!("{first} {second}: {} ({})", movie.title, movie.genre)
                },
            )),
        ]
    }
}
