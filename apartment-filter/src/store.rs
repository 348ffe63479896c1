use listing_common::{Apartment, FilterState, SortField, SortKey, SortOrder, ValueRange};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, warn};
use wasm_bindgen::prelude::*;

use crate::cache::FilterCache;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError, FILTER_ERROR_MESSAGE, LOAD_ERROR_MESSAGE};
use crate::filter::{cache_key, matches_filter, validate_filter};
use crate::ingest::parse_apartment_data;
use crate::sort::sorted;

/// 加载凭证 - 标识一次异步加载，只有最新的凭证能写入结果
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
}

#[wasm_bindgen]
impl LoadTicket {
    /// 凭证序号，单调递增
    #[wasm_bindgen(getter)]
    pub fn sequence(&self) -> f64 {
        self.sequence as f64
    }
}

/// 一次筛选的结果来源
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOutcome {
    /// 命中缓存，未重新计算
    CacheHit,
    /// 重新筛选并排序后写入缓存
    Computed,
}

/// 房源列表状态 - 持有全部房源、当前筛选排序分页状态和筛选缓存
#[derive(Debug)]
pub struct ApartmentStore {
    config: StoreConfig,
    apartments: Vec<Apartment>,
    filtered_result: Vec<Apartment>,
    visible_count: usize,
    loading: bool,
    filter: FilterState,
    sort: SortKey,
    cache: FilterCache,
    error: Option<String>,
    load_sequence: u64,
}

impl Default for ApartmentStore {
    fn default() -> Self {
        Self::with_valid_config(StoreConfig::default())
    }
}

impl ApartmentStore {
    /// 使用给定配置创建空的房源列表
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: StoreConfig) -> Self {
        Self {
            apartments: Vec::new(),
            filtered_result: Vec::new(),
            visible_count: config.page_size,
            loading: false,
            filter: config.default_filter.clone(),
            sort: SortKey::default(),
            cache: FilterCache::new(config.cache_capacity),
            error: None,
            load_sequence: 0,
            config,
        }
    }

    //===== 加载 =====

    /// 开始一次加载，之前发出的凭证随之失效
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_sequence += 1;
        self.loading = true;
        self.error = None;
        LoadTicket {
            sequence: self.load_sequence,
        }
    }

    /// 写入加载结果
    ///
    /// 凭证已过期时丢弃数据并返回 `Ok(None)`；否则返回载入的条数，
    /// 数据无法解析时返回对应的错误，状态按加载失败处理。
    pub fn finish_load(&mut self, ticket: LoadTicket, data: &Value) -> Result<Option<usize>> {
        if !self.is_current(ticket) {
            return Ok(None);
        }

        self.ingest(data).map(Some)
    }

    /// 记录数据源本身的失败（网络错误、超时等）
    pub fn fail_load(&mut self, ticket: LoadTicket, reason: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        error!(reason, "apartment source failed");
        self.clear_after_failed_load();
        true
    }

    /// 一次性加载房源数据
    pub fn load_apartments(&mut self, data: &Value) -> Result<usize> {
        let ticket = self.begin_load();
        debug!(sequence = ticket.sequence, "loading apartments");
        self.ingest(data)
    }

    /// 从 JSON 文本加载房源数据，文本无法解析时按格式错误处理
    pub fn load_from_str(&mut self, text: &str) -> Result<usize> {
        match serde_json::from_str::<Value>(text) {
            Ok(data) => self.load_apartments(&data),
            Err(e) => {
                self.begin_load();
                let err = StoreError::Format(format!("malformed JSON: {}", e));
                error!(error = %err, "failed to load apartments");
                self.clear_after_failed_load();
                Err(err)
            }
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        if ticket.sequence == self.load_sequence {
            return true;
        }

        warn!(
            stale = ticket.sequence,
            current = self.load_sequence,
            "discarding result of superseded load"
        );
        false
    }

    fn ingest(&mut self, data: &Value) -> Result<usize> {
        let outcome = parse_apartment_data(data);
        self.loading = false;

        match outcome {
            Ok(apartments) => {
                debug!(count = apartments.len(), "apartments loaded");
                self.filtered_result = apartments.clone();
                self.apartments = apartments;
                Ok(self.apartments.len())
            }
            Err(e) => {
                error!(error = %e, "failed to load apartments");
                self.clear_after_failed_load();
                Err(e)
            }
        }
    }

    fn clear_after_failed_load(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_ERROR_MESSAGE.to_string());
        self.apartments.clear();
        self.filtered_result.clear();
    }

    //===== 筛选与排序 =====

    /// 应用新的筛选条件
    ///
    /// 筛选条件整体替换，显示条数重置为一页。相同条件和排序键的结果从缓存读取。
    /// 失败时清空结果并记录提示信息。
    pub fn apply_filters(&mut self, filter: FilterState) -> Result<FilterOutcome> {
        self.loading = true;
        self.error = None;
        self.filter = filter;
        self.visible_count = self.config.page_size;

        let outcome = self.compute_filtered();
        self.loading = false;

        outcome.map_err(|e| {
            error!(error = %e, "error applying filters");
            self.error = Some(FILTER_ERROR_MESSAGE.to_string());
            self.filtered_result.clear();
            e
        })
    }

    fn compute_filtered(&mut self) -> Result<FilterOutcome> {
        // 无效条件不能读缓存，否则会拿到其他条件的结果
        validate_filter(&self.filter)?;
        let key = cache_key(&self.filter, self.sort)?;

        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %key, count = cached.len(), "filter cache hit");
            self.filtered_result = cached.to_vec();
            return Ok(FilterOutcome::CacheHit);
        }

        let matched: Vec<Apartment> = self
            .apartments
            .iter()
            .filter(|apartment| matches_filter(apartment, &self.filter))
            .cloned()
            .collect();
        let result = sorted(&matched, self.sort);

        debug!(key = %key, count = result.len(), "filter cache miss");
        if let Some(evicted) = self.cache.insert(key, result.clone()) {
            debug!(key = %evicted, "evicted filter cache entry");
        }
        self.filtered_result = result;
        Ok(FilterOutcome::Computed)
    }

    /// 修改排序键并对当前结果重新排序
    ///
    /// 不重新筛选，不读写缓存，也不重置显示条数。
    pub fn sort_apartments(&mut self, field: SortField, order: SortOrder) {
        self.sort = SortKey::new(field, order);
        self.filtered_result = sorted(&self.filtered_result, self.sort);
    }

    /// 显示更多：增加一页的显示条数，不检查上限
    pub fn show_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.config.page_size);
    }

    //===== 只读视图 =====

    /// 当前页的房源：结果中的前 `visible_count` 条
    pub fn filtered_apartments(&self) -> &[Apartment] {
        let end = self.visible_count.min(self.filtered_result.len());
        &self.filtered_result[..end]
    }

    /// 完整的筛选排序结果
    pub fn filtered_result(&self) -> &[Apartment] {
        &self.filtered_result
    }

    pub fn apartments(&self) -> &[Apartment] {
        &self.apartments
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.filtered_result.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    /// 全部房源中出现过的房间数
    pub fn available_rooms(&self) -> BTreeSet<i64> {
        self.apartments.iter().map(|a| a.rooms).collect()
    }

    /// 以房间数为键的出现标记
    pub fn room_counts(&self) -> BTreeMap<i64, bool> {
        self.apartments.iter().map(|a| (a.rooms, true)).collect()
    }

    /// 全部房源的价格区间，没有数据时返回默认区间
    pub fn min_max_price(&self) -> ValueRange {
        ValueRange::spanning(self.apartments.iter().map(|a| a.price))
            .unwrap_or(self.config.price_range_default)
    }

    /// 全部房源的面积区间，没有数据时返回默认区间
    pub fn min_max_area(&self) -> ValueRange {
        ValueRange::spanning(self.apartments.iter().map(|a| a.area))
            .unwrap_or(self.config.area_range_default)
    }
}
