//! Transport-side types, as received from an API.

use std::collections::BTreeMap;

use sconv_core::reflect_struct;

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct UserDto {
        pub user_id: i64,
        pub user_name: String,
        pub email: String,
        pub password: String,
        pub aliases: Vec<String>,
        pub user_info: UserInfoDto,
        pub favorite_books: BTreeMap<String, BookDto>,
        pub top_5_movies: [MovieDto; 5],
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct UserInfoDto {
        pub first_name: String,
        pub last_name: String,
        pub age: u32,
        pub addresses: Vec<AddressDto>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct AddressDto {
        pub street: String,
        pub city: String,
        pub number: String,
        pub zip_code: String,
        pub primary: bool,
        pub references: Vec<String>,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BookDto {
        pub author: String,
        pub genre: String,
        pub title: String,
    }
}

reflect_struct! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct MovieDto {
        pub title: String,
        pub genre: String,
        pub year: u16,
    }
}

fn movie(title: &str, genre: &str, year: u16) -> MovieDto {
    MovieDto {
        title: title.to_string(),
        genre: genre.to_string(),
        year,
    }
}

fn book(author: &str, genre: &str, title: &str) -> (String, BookDto) {
    (
        genre.to_string(),
        BookDto {
            author: author.to_string(),
            genre: genre.to_string(),
            title: title.to_string(),
        },
    )
}

/// The user mapped by `sconv demo`.
pub fn sample_user() -> UserDto {
    UserDto {
        user_id: 15369764,
        user_name: "John".to_string(),
        email: "john.test@doe.org".to_string(),
        password: "de_*wwe?-QW.".to_string(),
        aliases: vec!["john".to_string(), "johnny".to_string(), "big john".to_string()],
        user_info: UserInfoDto {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            age: 25,
            addresses: vec![
                AddressDto {
                    street: "Main Street".to_string(),
                    city: "New York".to_string(),
                    number: "123".to_string(),
                    zip_code: "10001".to_string(),
                    primary: true,
                    references: vec![
                        "Near the shoe store".to_string(),
                        "Near the bank".to_string(),
                    ],
                },
                AddressDto {
                    street: "Second Street".to_string(),
                    city: "New York".to_string(),
                    number: "456".to_string(),
                    zip_code: "10002".to_string(),
                    primary: false,
                    references: vec![
                        "Near the supermarket".to_string(),
                        "Near the food store".to_string(),
                    ],
                },
            ],
        },
        favorite_books: BTreeMap::from([
            book("Cixin Liu", "Sci-Fi", "The Three-Body Problem"),
            book("J.R.R. Tolkien", "Fantasy", "The Lord of the Rings"),
        ]),
        top_5_movies: [
            movie("The Lord of the Rings", "Fantasy", 2001),
            movie("The Hobbit", "Fantasy", 2012),
            movie("The Matrix", "Sci-Fi", 1999),
            movie("The Dark Knight", "Action", 2008),
            movie("Arrival", "Sci-Fi", 2016),
        ],
    }
}
