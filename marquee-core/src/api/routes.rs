macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and its clients.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod system {
        pub const HEALTH: &str = v1_path!("/health");
        pub const DB_CHECK: &str = v1_path!("/db-check");
    }

    pub mod users {
        pub const COLLECTION: &str = v1_path!("/users");
        pub const PASSWORD: &str = v1_path!("/users/password");
    }

    pub mod auth {
        pub const LOGIN: &str = v1_path!("/auth/login");
    }

    pub mod catalog {
        pub const MOVIES: &str = v1_path!("/catalog/movies");
        pub const MOVIE: &str = v1_path!("/catalog/movies/{id}");
        pub const LOOKUP: &str = v1_path!("/catalog/lookup");
        pub const RANDOM: &str = v1_path!("/catalog/random");
        pub const LEADERBOARD: &str = v1_path!("/catalog/leaderboard");
    }

    pub mod watchlist {
        pub const MOVIES: &str = v1_path!("/watchlist/movies");
        pub const FILM: &str = v1_path!("/watchlist/films/{film_number}");
        pub const CLEAR: &str = v1_path!("/watchlist/clear");
        pub const CURRENT: &str = v1_path!("/watchlist/current");
        pub const SUMMARY: &str = v1_path!("/watchlist/summary");
        pub const GO_TO: &str = v1_path!("/watchlist/go-to/{film_number}");
        pub const SWAP: &str = v1_path!("/watchlist/swap");
        pub const REWIND: &str = v1_path!("/watchlist/rewind");

        pub mod moves {
            pub const BEGINNING: &str = v1_path!("/watchlist/move/beginning");
            pub const END: &str = v1_path!("/watchlist/move/end");
            pub const FILM_NUMBER: &str =
                v1_path!("/watchlist/move/film-number");
        }

        pub mod play {
            pub const CURRENT: &str = v1_path!("/watchlist/play/current");
            pub const REST: &str = v1_path!("/watchlist/play/rest");
            pub const ALL: &str = v1_path!("/watchlist/play/all");
        }
    }

    pub mod metadata {
        pub const DIRECTOR: &str = v1_path!("/metadata/director");
        pub const TOP_RATED: &str = v1_path!("/metadata/top-rated");
        pub const SEARCH: &str = v1_path!("/metadata/search");
        pub const MOVIE: &str = v1_path!("/metadata/movies/{id}");
    }
}

/// Fill `{name}` placeholders in a route template.
pub fn fill(template: &str, params: &[(&str, &dyn std::fmt::Display)]) -> String {
    params.iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{name}}}"), &value.to_string())
    })
}
