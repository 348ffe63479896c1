use wasm_bindgen::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

// 导出模块
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod sort;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use listing_common::{Apartment, FilterState, SortField, SortKey, SortOrder, ValueRange};
pub use store::{ApartmentStore, FilterOutcome, LoadTicket};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// 输出到浏览器控制台，非 wasm 目标下只依赖 tracing
fn console_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::error_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

// 序列化为普通 JS 对象（映射输出为对象而不是 Map）
fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("序列化{}失败: {}", what, e)))
}

/// 房源列表JS接口 - 提供给JavaScript使用的状态容器
#[wasm_bindgen]
pub struct ApartmentStoreJS {
    store: ApartmentStore,
}

#[wasm_bindgen]
impl ApartmentStoreJS {
    /// 创建房源列表，配置为空时使用默认值
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ApartmentStoreJS, JsValue> {
        console_error_panic_hook::set_once();

        let config: StoreConfig = if config.is_undefined() || config.is_null() {
            StoreConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("解析配置失败: {}", e)))?
        };

        let store = ApartmentStore::new(config).map_err(|e| {
            console_error(&format!("初始化房源列表失败: {}", e));
            JsValue::from_str(&e.to_string())
        })?;

        Ok(ApartmentStoreJS { store })
    }

    /// 一次性加载房源数据，成功返回 true
    pub fn load_apartments(&mut self, data: JsValue) -> bool {
        let ticket = self.store.begin_load();
        self.finish_load(&ticket, data)
    }

    /// 开始异步加载，返回的凭证用于提交结果
    pub fn begin_load(&mut self) -> LoadTicket {
        self.store.begin_load()
    }

    /// 提交加载结果；凭证过期或数据无效时返回 false
    pub fn finish_load(&mut self, ticket: &LoadTicket, data: JsValue) -> bool {
        let payload = serde_wasm_bindgen::from_value::<serde_json::Value>(data);

        let value = match payload {
            Ok(value) => value,
            Err(e) => {
                console_error(&format!("解析房源数据失败: {}", e));
                self.store.fail_load(*ticket, &e.to_string());
                return false;
            }
        };

        match self.store.finish_load(*ticket, &value) {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                console_error(&format!("加载房源失败: {}", e));
                false
            }
        }
    }

    /// 记录数据源失败
    pub fn fail_load(&mut self, ticket: &LoadTicket, reason: &str) -> bool {
        console_error(&format!("加载房源失败: {}", reason));
        self.store.fail_load(*ticket, reason)
    }

    /// 应用筛选条件；计算失败不会抛出，错误信息通过 error 读取
    pub fn apply_filters(&mut self, filter: JsValue) -> Result<(), JsValue> {
        let filter: FilterState = serde_wasm_bindgen::from_value(filter)
            .map_err(|e| JsValue::from_str(&format!("解析筛选条件失败: {}", e)))?;

        if let Err(e) = self.store.apply_filters(filter) {
            console_error(&format!("筛选失败: {}", e));
        }
        Ok(())
    }

    /// 按字段和方向排序，例如 ("price", "desc")
    pub fn sort_apartments(&mut self, field: &str, order: &str) -> Result<(), JsValue> {
        let field: SortField = field
            .parse()
            .map_err(|e: String| JsValue::from_str(&StoreError::InvalidSortKey(e).to_string()))?;
        let order: SortOrder = order
            .parse()
            .map_err(|e: String| JsValue::from_str(&StoreError::InvalidSortKey(e).to_string()))?;

        self.store.sort_apartments(field, order);
        Ok(())
    }

    pub fn show_more(&mut self) {
        self.store.show_more();
    }

    /// 当前页的房源
    pub fn filtered_apartments(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.filtered_apartments(), "房源列表")
    }

    /// 完整的筛选结果
    pub fn filtered_result(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.filtered_result(), "筛选结果")
    }

    pub fn filter(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.filter(), "筛选条件")
    }

    pub fn available_rooms(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.available_rooms(), "房间数")
    }

    /// 以房间数为键的对象，例如 { "1": true, "2": true }
    pub fn room_counts(&self) -> Result<JsValue, JsValue> {
        let counts: BTreeMap<String, bool> = self
            .store
            .room_counts()
            .into_iter()
            .map(|(rooms, present)| (rooms.to_string(), present))
            .collect();
        to_js(&counts, "房间数")
    }

    pub fn min_max_price(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.min_max_price(), "价格区间")
    }

    pub fn min_max_area(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.min_max_area(), "面积区间")
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.store.is_loading()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.store.error().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn has_more(&self) -> bool {
        self.store.has_more()
    }

    #[wasm_bindgen(getter)]
    pub fn visible_count(&self) -> usize {
        self.store.visible_count()
    }

    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.store.filtered_result().len()
    }
}
