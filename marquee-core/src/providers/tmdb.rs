use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ProviderError;

pub const TMDB_V3_BASE: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Summary of a movie as returned by search and listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataMovie {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataMovieDetails {
    #[serde(flatten)]
    pub movie: MetadataMovie,
    pub genres: Vec<String>,
    /// Runtime in minutes, when TMDB knows it.
    pub runtime: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
}

impl From<TmdbMovie> for MetadataMovie {
    fn from(movie: TmdbMovie) -> Self {
        MetadataMovie {
            id: movie.id,
            title: movie.title.unwrap_or_default(),
            release_date: movie.release_date.filter(|date| !date.is_empty()),
            rating: movie.vote_average,
            overview: movie.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TmdbPerson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    known_for: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    #[serde(flatten)]
    movie: TmdbMovie,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    #[serde(default)]
    runtime: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ApiKeyQuery<'a> {
    api_key: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    api_key: &'a str,
    query: &'a str,
}

/// Thin client over the TMDB v3 REST API.
#[derive(Clone)]
pub struct TmdbProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl fmt::Debug for TmdbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TmdbProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)
    }

    async fn get_tmdb_json<Q, T>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> Result<T, ProviderError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        info!(%url, "requesting TMDB");
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| ProviderError::Parse(err.to_string()));
        }

        #[derive(Debug, Deserialize)]
        struct TmdbErrorBody {
            #[serde(default)]
            status_message: Option<String>,
        }

        let message = response
            .json::<TmdbErrorBody>()
            .await
            .ok()
            .and_then(|body| body.status_message)
            .unwrap_or_else(|| {
                format!("TMDB request failed with status {status}")
            });
        error!(%url, status = status.as_u16(), %message, "TMDB request failed");

        match status.as_u16() {
            401 => Err(ProviderError::InvalidApiKey),
            404 => Err(ProviderError::NotFound),
            429 => Err(ProviderError::RateLimited),
            code => Err(ProviderError::Api {
                status: code,
                message,
            }),
        }
    }

    /// Movies a person is known for, restricted to people whose name matches
    /// `director` exactly.
    pub async fn movies_by_director(
        &self,
        director: &str,
    ) -> Result<Vec<MetadataMovie>, ProviderError> {
        let api_key = self.api_key()?;
        let page: Page<TmdbPerson> = self
            .get_tmdb_json(
                "search/person",
                &SearchQuery {
                    api_key,
                    query: director,
                },
            )
            .await?;

        Ok(page
            .results
            .into_iter()
            .filter(|person| person.name == director)
            .flat_map(|person| person.known_for)
            .filter(|movie| movie.media_type.as_deref() == Some("movie"))
            .map(MetadataMovie::from)
            .collect())
    }

    pub async fn top_rated(&self) -> Result<Vec<MetadataMovie>, ProviderError> {
        let api_key = self.api_key()?;
        let page: Page<TmdbMovie> = self
            .get_tmdb_json("movie/top_rated", &ApiKeyQuery { api_key })
            .await?;
        Ok(page.results.into_iter().map(MetadataMovie::from).collect())
    }

    pub async fn search_by_title(
        &self,
        title: &str,
    ) -> Result<Vec<MetadataMovie>, ProviderError> {
        let api_key = self.api_key()?;
        let page: Page<TmdbMovie> = self
            .get_tmdb_json(
                "search/movie",
                &SearchQuery {
                    api_key,
                    query: title,
                },
            )
            .await?;
        Ok(page.results.into_iter().map(MetadataMovie::from).collect())
    }

    pub async fn movie_details(
        &self,
        id: i64,
    ) -> Result<MetadataMovieDetails, ProviderError> {
        let api_key = self.api_key()?;
        let details: TmdbMovieDetails = self
            .get_tmdb_json(&format!("movie/{id}"), &ApiKeyQuery { api_key })
            .await?;
        Ok(MetadataMovieDetails {
            movie: details.movie.into(),
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            runtime: details.runtime,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    async fn search_person(
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        assert_eq!(params.get("api_key").map(String::as_str), Some("test-key"));
        Json(json!({
            "results": [
                {
                    "name": params["query"],
                    "known_for": [
                        {"id": 1, "media_type": "movie", "title": "Daughters of the Dust", "release_date": "1991-01-01", "vote_average": 7.1, "overview": "Sea islands"},
                        {"id": 2, "media_type": "tv", "name": "Queen Sugar"}
                    ]
                },
                {
                    "name": "Someone Else",
                    "known_for": [{"id": 3, "media_type": "movie", "title": "Other"}]
                }
            ]
        }))
    }

    async fn details(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
        if id == "404" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "id": id.parse::<i64>().unwrap(),
            "title": "Daughters of the Dust",
            "release_date": "1991-01-01",
            "vote_average": 7.1,
            "overview": "Sea islands",
            "genres": [{"id": 18, "name": "Drama"}],
            "runtime": 112
        })))
    }

    async fn mock_tmdb() -> String {
        let app = Router::new()
            .route("/search/person", get(search_person))
            .route(
                "/movie/top_rated",
                get(|| async {
                    Json(json!({"results": [{"id": 7, "title": "Top", "vote_average": 9.0}]}))
                }),
            )
            .route(
                "/search/movie",
                get(|| async { Json(json!({"page": 1, "total_results": 0})) }),
            )
            .route("/movie/{id}", get(details));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let provider =
            TmdbProvider::new(None, "http://127.0.0.1:9").unwrap();
        assert!(!provider.is_configured());
        assert!(matches!(
            provider.top_rated().await,
            Err(ProviderError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn movies_by_director_keeps_exact_name_matches_and_movies_only() {
        let base = mock_tmdb().await;
        let provider =
            TmdbProvider::new(Some("test-key".into()), base).unwrap();

        let movies = provider.movies_by_director("Julie Dash").await.unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Daughters of the Dust");
        assert_eq!(movies[0].rating, Some(7.1));
        assert_eq!(movies[0].release_date.as_deref(), Some("1991-01-01"));
    }

    #[tokio::test]
    async fn top_rated_maps_vote_average_to_rating() {
        let base = mock_tmdb().await;
        let provider =
            TmdbProvider::new(Some("test-key".into()), base).unwrap();

        let movies = provider.top_rated().await.unwrap();
        assert_eq!(movies[0].id, 7);
        assert_eq!(movies[0].rating, Some(9.0));
        assert_eq!(movies[0].overview, None);
    }

    #[tokio::test]
    async fn movie_details_include_genres_and_runtime() {
        let base = mock_tmdb().await;
        let provider =
            TmdbProvider::new(Some("test-key".into()), base).unwrap();

        let details = provider.movie_details(42).await.unwrap();
        assert_eq!(details.movie.id, 42);
        assert_eq!(details.genres, vec!["Drama".to_string()]);
        assert_eq!(details.runtime, Some(112));

        assert!(matches!(
            provider.movie_details(404).await,
            Err(ProviderError::NotFound)
        ));
    }

    #[tokio::test]
    async fn page_without_results_is_empty() {
        let base = mock_tmdb().await;
        let provider =
            TmdbProvider::new(Some("test-key".into()), base).unwrap();

        let movies = provider.search_by_title("Nothing Like It").await.unwrap();
        assert!(movies.is_empty());
    }
}
