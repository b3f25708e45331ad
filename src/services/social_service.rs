use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::models::social::SocialPost;
use crate::services::provider::ProviderError;

const REDDIT_SEARCH_URL: &str = "https://www.reddit.com/search.json";
const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

// Reddit's public JSON endpoint wants a distinctive UA; anonymous defaults
// get rate-limited aggressively.
const USER_AGENT: &str = "ai-concierge-prototype/0.2";

const TRENDING_FETCH: usize = 20;
const TRENDING_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct RedditSearchResponse {
    data: RedditListing,
}

#[derive(Debug, Deserialize)]
struct RedditListing {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    title: String,
    permalink: String,
    score: Option<i64>,
    subreddit: Option<String>,
    #[serde(default)]
    selftext: String,
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YoutubeSearchResponse {
    #[serde(default)]
    items: Vec<YoutubeItem>,
}

#[derive(Debug, Deserialize)]
struct YoutubeItem {
    id: YoutubeId,
    snippet: YoutubeSnippet,
}

#[derive(Debug, Deserialize)]
struct YoutubeId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YoutubeSnippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Clone)]
pub struct SocialService {
    client: Client,
    youtube_key: Option<String>,
}

impl SocialService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            youtube_key: env::var("YOUTUBE_API_KEY").ok(),
        }
    }

    /// Top Reddit posts from the past year for a keyword.
    pub async fn reddit_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SocialPost>, ProviderError> {
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(REDDIT_SEARCH_URL)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("q", query),
                ("sort", "top"),
                ("t", "year"),
                ("limit", limit_param.as_str()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("reddit", response).await);
        }

        let data: RedditSearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "reddit",
                detail: e.to_string(),
            }
        })?;

        let mut posts: Vec<SocialPost> = data
            .data
            .children
            .into_iter()
            .map(|child| normalize_reddit(child.data))
            .collect();
        posts.truncate(limit);
        Ok(posts)
    }

    /// Short-form travel videos for a keyword.
    pub async fn youtube_shorts(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SocialPost>, ProviderError> {
        let key = self
            .youtube_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("youtube"))?;

        let limit_param = limit.to_string();
        let response = self
            .client
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoDuration", "short"),
                ("maxResults", limit_param.as_str()),
                ("key", key),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("youtube", response).await);
        }

        let data: YoutubeSearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "youtube",
                detail: e.to_string(),
            }
        })?;

        Ok(data.items.into_iter().filter_map(normalize_youtube).collect())
    }

    /// Combined feed, videos first. A failing provider is logged and skipped
    /// so one outage never empties the whole feed.
    pub async fn combined_feed(&self, query: &str, limit: usize) -> Vec<SocialPost> {
        let (youtube, reddit) = futures::join!(
            self.youtube_shorts(query, limit),
            self.reddit_search(query, limit)
        );

        let mut feed = Vec::new();
        match youtube {
            Ok(posts) => feed.extend(posts),
            Err(err) => eprintln!("YouTube search failed: {}", err),
        }
        match reddit {
            Ok(posts) => feed.extend(posts),
            Err(err) => eprintln!("Reddit search failed: {}", err),
        }
        feed
    }

    /// Reddit posts that actually talk about the city, not just match the
    /// search expansion.
    pub async fn trending_spots(&self, city: &str) -> Result<Vec<SocialPost>, ProviderError> {
        let query = format!("{city} travel OR {city} places OR {city} itinerary");
        let fetch_param = TRENDING_FETCH.to_string();
        let response = self
            .client
            .get(REDDIT_SEARCH_URL)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("q", query.as_str()),
                ("sort", "top"),
                ("t", "year"),
                ("limit", fetch_param.as_str()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response("reddit", response).await);
        }

        let data: RedditSearchResponse = response.json().await.map_err(|e| {
            ProviderError::Decode {
                provider: "reddit",
                detail: e.to_string(),
            }
        })?;

        let posts = data.data.children.into_iter().map(|c| c.data).collect();
        Ok(filter_trending(posts, city))
    }
}

fn normalize_reddit(post: RedditPost) -> SocialPost {
    SocialPost {
        source: "reddit".to_string(),
        title: post.title,
        url: format!("https://www.reddit.com{}", post.permalink),
        score: post.score,
        subreddit: post.subreddit,
        // "self"/"default" markers are not fetchable images
        thumbnail: post.thumbnail.filter(|t| t.starts_with("http")),
        channel: None,
    }
}

fn normalize_youtube(item: YoutubeItem) -> Option<SocialPost> {
    let video_id = item.id.video_id?;
    Some(SocialPost {
        source: "youtube".to_string(),
        title: item.snippet.title,
        url: format!("https://www.youtube.com/watch?v={}", video_id),
        score: None,
        subreddit: None,
        thumbnail: item
            .snippet
            .thumbnails
            .and_then(|t| t.medium)
            .map(|t| t.url),
        channel: item.snippet.channel_title,
    })
}

fn filter_trending(posts: Vec<RedditPost>, city: &str) -> Vec<SocialPost> {
    let city_lower = city.to_lowercase();
    let mut relevant: Vec<SocialPost> = posts
        .into_iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&city_lower)
                || post.selftext.to_lowercase().contains(&city_lower)
        })
        .map(normalize_reddit)
        .collect();
    relevant.truncate(TRENDING_LIMIT);
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, selftext: &str) -> RedditPost {
        RedditPost {
            title: title.to_string(),
            permalink: "/r/travel/comments/x".to_string(),
            score: Some(10),
            subreddit: Some("travel".to_string()),
            selftext: selftext.to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn test_trending_filter_matches_title_or_body() {
        let posts = vec![
            post("Kyoto in 3 days", ""),
            post("Best ramen I ever had", "found it in kyoto last spring"),
            post("Generic travel tips", "packing cubes are great"),
        ];
        let trending = filter_trending(posts, "Kyoto");
        assert_eq!(trending.len(), 2);
    }

    #[test]
    fn test_reddit_thumbnail_markers_dropped() {
        let mut raw = post("A", "");
        raw.thumbnail = Some("self".to_string());
        assert_eq!(normalize_reddit(raw).thumbnail, None);

        let mut raw = post("B", "");
        raw.thumbnail = Some("https://i.redd.it/abc.jpg".to_string());
        assert!(normalize_reddit(raw).thumbnail.is_some());
    }

    #[test]
    fn test_trending_caps_at_ten() {
        let posts: Vec<RedditPost> = (0..15).map(|i| post(&format!("Kyoto {i}"), "")).collect();
        assert_eq!(filter_trending(posts, "kyoto").len(), TRENDING_LIMIT);
    }
}
