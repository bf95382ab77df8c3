//! 文件名搜索打分
//!
//! 各项加分可叠加；稳定排序保证同分时保持原集合顺序。

use crate::models::FileRecord;

const EXACT_BONUS: u32 = 100;
const PREFIX_BONUS: u32 = 50;
const CONTAINS_BONUS: u32 = 25;
const PATH_BONUS: u32 = 10;
const BREVITY_BASE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub record: &'a FileRecord,
    /// 在原集合中的下标
    pub index: usize,
    pub score: u32,
}

/// `query_lc` 必须已转小写。返回 0 表示不匹配。
pub fn score_name(query_lc: &str, name: &str) -> u32 {
    if query_lc.is_empty() {
        return 0;
    }

    let name_lc = name.to_lowercase();
    let base_lc = crate::models::virtual_path::basename(&name_lc);

    let mut score = 0;
    if base_lc == query_lc {
        score += EXACT_BONUS;
    }
    if base_lc.starts_with(query_lc) {
        score += PREFIX_BONUS;
    }
    if base_lc.contains(query_lc) {
        score += CONTAINS_BONUS;
    }
    if name_lc.contains(query_lc) {
        score += PATH_BONUS;
    }
    if score == 0 {
        return 0;
    }

    let len = base_lc.chars().count();
    score + BREVITY_BASE.saturating_sub(len) as u32
}

pub fn search<'a>(query: &str, records: &'a [FileRecord]) -> Vec<SearchHit<'a>> {
    let query_lc = query.to_lowercase();
    if query_lc.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.is_placeholder())
        .filter_map(|(index, record)| {
            let score = score_name(&query_lc, &record.name);
            (score > 0).then_some(SearchHit {
                record,
                index,
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
