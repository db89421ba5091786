//! Domain-side types the DTOs are mapped into.

use std::collections::BTreeMap;

use sconv_core::reflect_struct;
use serde::Serialize;

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct UserDomain {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub password: String,
        pub phone: String,
        pub aliases: Vec<String>,
        pub info: UserInfoDomain,
        pub favorite_books: BTreeMap<String, BookDomain>,
        pub top_movies: [MovieDomain; 5],
        pub greeting: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct UserInfoDomain {
        pub full_name: String,
        pub age: u32,
        pub addresses: Vec<AddressDomain>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct AddressDomain {
        pub street: String,
        pub number: String,
        pub city: String,
        pub zip_code: String,
        pub is_primary: bool,
        pub references: Vec<String>,
        pub summary: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct BookDomain {
        pub title: String,
        pub author: String,
        pub genre: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct MovieDomain {
        pub title: String,
        pub year: u16,
        pub description: String,
    }
}
