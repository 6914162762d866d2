//! Inbound query parameters and their upstream mapping.
//!
//! Optional fields that are absent are left out of the upstream call. Paging
//! is always forwarded, with the page size capped at [`MAX_PAGE_SIZE`].

use serde::Deserialize;

use crate::upstream::QueryParams;

pub const MAX_PAGE_SIZE: u32 = 40;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.min(MAX_PAGE_SIZE)
}

fn push_paging(params: &mut QueryParams, page: Option<u32>, page_size: Option<u32>) {
    params
        .insert("page", page.unwrap_or(DEFAULT_PAGE).to_string())
        .insert(
            "page_size",
            clamp_page_size(page_size.unwrap_or(DEFAULT_PAGE_SIZE)).to_string(),
        );
}

/// Paging only, for per-game sub-collections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, self.page, self.page_size);
        params
    }
}

/// Ordering plus paging, for platform and genre collections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderedPageQuery {
    pub ordering: Option<String>,
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
}

impl OrderedPageQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("ordering", self.ordering.as_deref());
        push_paging(&mut params, self.page, self.page_size);
        params
    }
}

/// Search, filters and ordering accepted by the games collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesQuery {
    pub search: Option<String>,
    #[serde(alias = "searchPrecise")]
    pub search_precise: Option<bool>,
    #[serde(alias = "searchExact")]
    pub search_exact: Option<bool>,
    #[serde(alias = "parentPlatforms")]
    pub parent_platforms: Option<String>,
    pub platforms: Option<String>,
    pub stores: Option<String>,
    pub developers: Option<String>,
    pub publishers: Option<String>,
    pub genres: Option<String>,
    pub tags: Option<String>,
    pub creators: Option<String>,
    pub dates: Option<String>,
    pub updated: Option<String>,
    #[serde(alias = "platformsCount")]
    pub platforms_count: Option<i64>,
    pub metacritic: Option<String>,
    #[serde(alias = "excludeCollection")]
    pub exclude_collection: Option<i64>,
    #[serde(alias = "excludeAdditions")]
    pub exclude_additions: Option<i64>,
    #[serde(alias = "excludeParents")]
    pub exclude_parents: Option<i64>,
    #[serde(alias = "excludeGameSeries")]
    pub exclude_game_series: Option<i64>,
    #[serde(alias = "excludeStores")]
    pub exclude_stores: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
}

impl GamesQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("search", self.search.as_deref())
            .insert_opt("search_precise", self.search_precise)
            .insert_opt("search_exact", self.search_exact)
            .insert_opt("parent_platforms", self.parent_platforms.as_deref())
            .insert_opt("platforms", self.platforms.as_deref())
            .insert_opt("stores", self.stores.as_deref())
            .insert_opt("developers", self.developers.as_deref())
            .insert_opt("publishers", self.publishers.as_deref())
            .insert_opt("genres", self.genres.as_deref())
            .insert_opt("tags", self.tags.as_deref())
            .insert_opt("creators", self.creators.as_deref())
            .insert_opt("dates", self.dates.as_deref())
            .insert_opt("updated", self.updated.as_deref())
            .insert_opt("platforms_count", self.platforms_count)
            .insert_opt("metacritic", self.metacritic.as_deref())
            .insert_opt("exclude_collection", self.exclude_collection)
            .insert_opt("exclude_additions", self.exclude_additions)
            .insert_opt("exclude_parents", self.exclude_parents)
            .insert_opt("exclude_game_series", self.exclude_game_series)
            .insert_opt("exclude_stores", self.exclude_stores.as_deref())
            .insert_opt("ordering", self.ordering.as_deref());
        push_paging(&mut params, self.page, self.page_size);
        params
    }
}
