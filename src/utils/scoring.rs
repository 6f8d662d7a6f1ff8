//! 评分计算
//!
//! 评分条目 → 评估 → 结果明细 → 最终结果，逐级加权汇总。
//! 分母为 0 时返回 None，不产生 NaN/Infinity。

use chrono::NaiveDate;

use crate::errors::{BackofficeError, Result};

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 单条评分 = 选项分值 × 占比
pub fn rating_score(rate: f64, percentage: f64) -> f64 {
    rate * percentage
}

/// 评估得分 = round2(Σ score / Σ percentage)
///
/// 输入为 `(score, percentage)`，任一条目未作答时为 None。
pub fn evaluation_score<I>(ratings: I) -> Result<f64>
where
    I: IntoIterator<Item = (Option<f64>, f64)>,
{
    let mut total_score = 0.0;
    let mut total_percentage = 0.0;
    for (score, percentage) in ratings {
        let score = score.ok_or_else(|| {
            BackofficeError::validation("All criteria must be answered before submitting")
        })?;
        total_score += score;
        total_percentage += percentage;
    }
    if total_percentage <= 0.0 {
        return Err(BackofficeError::validation(
            "Evaluation has no weighted criteria to score",
        ));
    }
    Ok(round2(total_score / total_percentage))
}

/// 评估天数：向上取整
pub fn evaluation_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let seconds = (end - start).num_seconds().max(0);
    (seconds + 86_399) / 86_400
}

/// 权重 = (评估天数 / 当年天数) × 参与度
pub fn evaluation_weight(
    start: NaiveDate,
    end: NaiveDate,
    percent_involvement: f64,
    days_in_year: i64,
) -> f64 {
    if days_in_year <= 0 {
        return 0.0;
    }
    evaluation_days(start, end) as f64 / days_in_year as f64 * percent_involvement
}

/// Σ weighted_score / Σ weight，总权重为 0 时返回 None
pub fn weighted_average<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (sum_weighted, sum_weight) = items
        .into_iter()
        .fold((0.0, 0.0), |(sw, w), (weighted_score, weight)| {
            (sw + weighted_score, w + weight)
        });
    if sum_weight > 0.0 {
        let value = sum_weighted / sum_weight;
        value.is_finite().then_some(value)
    } else {
        None
    }
}

/// 明细得分：取同一模板下已提交评估的加权平均
///
/// 返回 `(score, weighted_score)`。
pub fn detail_score<I>(detail_weight: f64, submitted: I) -> (Option<f64>, Option<f64>)
where
    I: IntoIterator<Item = (f64, f64)>,
{
    match weighted_average(submitted) {
        Some(score) => (Some(score), Some(detail_weight * score)),
        None => (None, None),
    }
}

/// 结果得分：只统计已有得分的明细
pub fn result_score<I>(details: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, Option<f64>)>,
{
    weighted_average(
        details
            .into_iter()
            .filter_map(|(weight, weighted_score)| weighted_score.map(|ws| (ws, weight))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.456), 4.46);
        assert_eq!(round2(4.454), 4.45);
        assert_eq!(round2(3.0), 3.0);
    }

    #[test]
    fn test_evaluation_score_half_and_half() {
        let ratings = [
            (Some(rating_score(4.0, 50.0)), 50.0),
            (Some(rating_score(5.0, 50.0)), 50.0),
        ];
        assert_eq!(evaluation_score(ratings).unwrap(), 4.5);
    }

    #[test]
    fn test_evaluation_score_requires_every_answer() {
        let ratings = [(Some(200.0), 50.0), (None, 50.0)];
        assert!(evaluation_score(ratings).is_err());
    }

    #[test]
    fn test_evaluation_score_rejects_zero_percentage() {
        assert!(evaluation_score([(Some(0.0), 0.0)]).is_err());
        assert!(evaluation_score(Vec::<(Option<f64>, f64)>::new()).is_err());
    }

    #[test]
    fn test_weight_in_leap_year() {
        let weight = evaluation_weight(date(2024, 1, 1), date(2024, 1, 11), 50.0, 366);
        assert!((weight - 10.0 / 366.0 * 50.0).abs() < 1e-9);
        assert!((weight - 1.366).abs() < 0.001);
    }

    #[test]
    fn test_weight_reversed_window_is_zero() {
        assert_eq!(
            evaluation_weight(date(2024, 2, 1), date(2024, 1, 1), 100.0, 366),
            0.0
        );
    }

    #[test]
    fn test_detail_score() {
        // 两个已提交评估：(weighted_score, weight)
        let (score, weighted) = detail_score(0.5, [(4.0 * 2.0, 2.0), (5.0 * 1.0, 1.0)]);
        let expected = 13.0 / 3.0;
        assert!((score.unwrap() - expected).abs() < 1e-9);
        assert!((weighted.unwrap() - 0.5 * expected).abs() < 1e-9);
    }

    #[test]
    fn test_detail_without_submissions_is_unscored() {
        assert_eq!(detail_score(0.5, Vec::new()), (None, None));
        assert_eq!(detail_score(0.5, [(0.0, 0.0)]), (None, None));
    }

    #[test]
    fn test_result_score_skips_unscored_details() {
        let score = result_score([(0.5, Some(0.5 * 4.0)), (1.0, Some(3.0)), (2.0, None)]);
        assert!((score.unwrap() - 5.0 / 1.5).abs() < 1e-9);
        assert_eq!(result_score([(1.0, None)]), None);
    }
}
