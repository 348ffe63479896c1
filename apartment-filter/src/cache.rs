use listing_common::Apartment;
use std::collections::{HashMap, VecDeque};

/// 筛选结果缓存 - 缓存键到已排序结果的映射
///
/// 默认不限大小，整个会话期间有效。设置容量后按插入顺序淘汰最早的条目。
#[derive(Debug, Default)]
pub struct FilterCache {
    entries: HashMap<String, Vec<Apartment>>,
    insertion_order: VecDeque<String>,
    capacity: Option<usize>,
}

impl FilterCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Apartment]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 写入结果，返回被淘汰的键
    pub fn insert(&mut self, key: String, result: Vec<Apartment>) -> Option<String> {
        if self.entries.insert(key.clone(), result).is_some() {
            return None;
        }
        self.insertion_order.push_back(key);

        match self.capacity {
            Some(capacity) if self.entries.len() > capacity => {
                let evicted = self.insertion_order.pop_front()?;
                self.entries.remove(&evicted);
                Some(evicted)
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
