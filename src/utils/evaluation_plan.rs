//! 评估生成规划
//!
//! 根据项目成员关系与模板，计算某个被评估者需要创建的评估与结果明细。
//! 只做纯计算，写库由存储层在事务内完成。

use chrono::NaiveDate;
use std::collections::HashSet;

/// 闭区间日期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 成员关系的起止日期任一落在窗口内
    pub fn touched_by(&self, other: &DateWindow) -> bool {
        self.contains(other.start) || self.contains(other.end)
    }

    pub fn intersect(&self, other: &DateWindow) -> Option<DateWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateWindow { start, end })
    }
}

#[derive(Debug, Clone)]
pub struct MembershipInput {
    pub id: i64,
    pub project_id: i64,
    pub employee_id: i64,
    pub project_role_id: i64,
    pub window: DateWindow,
    pub allocation_rate: f64,
}

#[derive(Debug, Clone)]
pub struct TemplateInput {
    pub id: i64,
    pub evaluee_role_id: i64,
    pub evaluator_role_id: i64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEvaluation {
    pub evaluator_id: i64,
    pub evaluation_template_id: i64,
    pub project_id: Option<i64>,
    pub project_member_id: Option<i64>,
    pub window: DateWindow,
    pub percent_involvement: f64,
    pub is_hr: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDetail {
    pub evaluation_template_id: i64,
    pub weight: f64,
}

#[derive(Debug, Default, Clone)]
pub struct EvaluationPlan {
    pub evaluations: Vec<PlannedEvaluation>,
    pub details: Vec<PlannedDetail>,
}

impl EvaluationPlan {
    fn push(&mut self, template: &TemplateInput, evaluation: PlannedEvaluation) {
        let duplicate = self.evaluations.iter().any(|e| {
            e.evaluator_id == evaluation.evaluator_id
                && e.evaluation_template_id == evaluation.evaluation_template_id
        });
        if duplicate {
            return;
        }
        if !self
            .details
            .iter()
            .any(|d| d.evaluation_template_id == template.id)
        {
            self.details.push(PlannedDetail {
                evaluation_template_id: template.id,
                weight: template.rate,
            });
        }
        self.evaluations.push(evaluation);
    }
}

/// HR 评估：固定模板 + 所有 HR 评估者
pub struct HrInput<'a> {
    pub template: &'a TemplateInput,
    pub evaluator_ids: &'a [i64],
}

/// 为单个被评估者规划评估
///
/// `memberships` 需包含被评估者所在项目的全部成员关系，`templates` 只含启用的模板。
pub fn plan_for_evaluee(
    evaluee_id: i64,
    period: DateWindow,
    memberships: &[MembershipInput],
    templates: &[TemplateInput],
    hr: Option<HrInput<'_>>,
) -> EvaluationPlan {
    let mut plan = EvaluationPlan::default();

    let own = memberships
        .iter()
        .filter(|m| m.employee_id == evaluee_id && period.touched_by(&m.window));

    for membership in own {
        let co_members = memberships.iter().filter(|m| {
            m.project_id == membership.project_id
                && m.employee_id != evaluee_id
                && period.touched_by(&m.window)
        });

        for co_member in co_members {
            let Some(template) = templates.iter().find(|t| {
                t.evaluee_role_id == membership.project_role_id
                    && t.evaluator_role_id == co_member.project_role_id
            }) else {
                continue;
            };

            let Some(window) = membership
                .window
                .intersect(&co_member.window)
                .and_then(|w| w.intersect(&period))
            else {
                continue;
            };

            plan.push(
                template,
                PlannedEvaluation {
                    evaluator_id: co_member.employee_id,
                    evaluation_template_id: template.id,
                    project_id: Some(membership.project_id),
                    project_member_id: Some(membership.id),
                    window,
                    percent_involvement: membership.allocation_rate,
                    is_hr: false,
                },
            );
        }
    }

    if let Some(hr) = hr {
        let mut seen = HashSet::new();
        for &evaluator_id in hr.evaluator_ids {
            if evaluator_id == evaluee_id || !seen.insert(evaluator_id) {
                continue;
            }
            plan.push(
                hr.template,
                PlannedEvaluation {
                    evaluator_id,
                    evaluation_template_id: hr.template.id,
                    project_id: None,
                    project_member_id: None,
                    window: period,
                    percent_involvement: 100.0,
                    is_hr: true,
                },
            );
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVELOPER: i64 = 10;
    const LEAD: i64 = 11;
    const HR_ROLE: i64 = 2;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn member(id: i64, employee: i64, role: i64, start: NaiveDate, end: NaiveDate) -> MembershipInput {
        MembershipInput {
            id,
            project_id: 1,
            employee_id: employee,
            project_role_id: role,
            window: DateWindow::new(start, end),
            allocation_rate: 80.0,
        }
    }

    fn january() -> DateWindow {
        DateWindow::new(date(1, 1), date(1, 31))
    }

    fn dev_by_lead() -> TemplateInput {
        TemplateInput {
            id: 100,
            evaluee_role_id: DEVELOPER,
            evaluator_role_id: LEAD,
            rate: 0.5,
        }
    }

    #[test]
    fn test_touched_by_either_boundary() {
        let period = january();
        assert!(period.touched_by(&DateWindow::new(date(1, 10), date(3, 1))));
        assert!(period.touched_by(&DateWindow::new(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(), date(1, 5))));
        // 完全包住周期的成员关系不算
        assert!(!period.touched_by(&DateWindow::new(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            date(2, 15)
        )));
    }

    #[test]
    fn test_developer_rated_by_lead() {
        let memberships = vec![
            member(1, 7, DEVELOPER, date(1, 10), date(1, 20)),
            member(2, 8, LEAD, date(1, 5), date(1, 25)),
        ];
        let plan = plan_for_evaluee(7, january(), &memberships, &[dev_by_lead()], None);

        assert_eq!(plan.evaluations.len(), 1);
        let evaluation = &plan.evaluations[0];
        assert_eq!(evaluation.evaluator_id, 8);
        assert_eq!(evaluation.project_member_id, Some(1));
        assert_eq!(evaluation.percent_involvement, 80.0);
        assert_eq!(evaluation.window, DateWindow::new(date(1, 10), date(1, 20)));
        assert_eq!(
            plan.details,
            vec![PlannedDetail {
                evaluation_template_id: 100,
                weight: 0.5
            }]
        );
    }

    #[test]
    fn test_missing_template_is_skipped() {
        let memberships = vec![
            member(1, 7, DEVELOPER, date(1, 10), date(1, 20)),
            member(2, 8, DEVELOPER, date(1, 5), date(1, 25)),
        ];
        let plan = plan_for_evaluee(7, january(), &memberships, &[dev_by_lead()], None);
        assert!(plan.evaluations.is_empty());
        assert!(plan.details.is_empty());
    }

    #[test]
    fn test_duplicate_memberships_yield_one_evaluation() {
        let memberships = vec![
            member(1, 7, DEVELOPER, date(1, 2), date(1, 8)),
            member(2, 7, DEVELOPER, date(1, 15), date(1, 28)),
            member(3, 8, LEAD, date(1, 1), date(1, 31)),
        ];
        let plan = plan_for_evaluee(7, january(), &memberships, &[dev_by_lead()], None);
        assert_eq!(plan.evaluations.len(), 1);
        // 先匹配者优先
        assert_eq!(plan.evaluations[0].project_member_id, Some(1));
        assert_eq!(plan.details.len(), 1);
    }

    #[test]
    fn test_disjoint_windows_are_skipped() {
        let memberships = vec![
            member(1, 7, DEVELOPER, date(1, 2), date(1, 8)),
            member(2, 8, LEAD, date(1, 20), date(1, 31)),
        ];
        let plan = plan_for_evaluee(7, january(), &memberships, &[dev_by_lead()], None);
        assert!(plan.evaluations.is_empty());
    }

    #[test]
    fn test_hr_evaluations_exclude_evaluee() {
        let hr_template = TemplateInput {
            id: 200,
            evaluee_role_id: HR_ROLE,
            evaluator_role_id: HR_ROLE,
            rate: 0.2,
        };
        let hr_ids = [7, 30, 31, 30];
        let plan = plan_for_evaluee(
            7,
            january(),
            &[],
            &[],
            Some(HrInput {
                template: &hr_template,
                evaluator_ids: &hr_ids,
            }),
        );
        let evaluators: Vec<i64> = plan.evaluations.iter().map(|e| e.evaluator_id).collect();
        assert_eq!(evaluators, vec![30, 31]);
        assert!(plan.evaluations.iter().all(|e| e.is_hr
            && e.percent_involvement == 100.0
            && e.window == january()));
        assert_eq!(plan.details.len(), 1);
        assert_eq!(plan.details[0].weight, 0.2);
    }
}
