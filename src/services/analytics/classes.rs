use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::try_join3;

use super::AnalyticsService;
use super::aggregate::{attendance_rate_by_class, homework_counts};
use crate::models::ApiResponse;
use crate::models::analytics::{
    facts::{FactFilter, HomeworkFact},
    requests::AnalyticsQuery,
    responses::{ClassAnalytics, ClassAnalyticsItem},
};
use crate::services::current_scope;

pub async fn class_analytics(
    service: &AnalyticsService,
    request: &HttpRequest,
    query: AnalyticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let now = Utc::now();
    let range = query.date_range(now.date_naive());
    let filter = FactFilter {
        range: Some(range),
        class_id: query.class_id,
        ..Default::default()
    };

    let (mut classes, attendance, homework) = try_join3(
        storage.class_items(scope),
        storage.attendance_facts(scope, filter),
        storage.homework_facts(scope, query.class_id, None, Some(range)),
    )
    .await?;
    if let Some(class_id) = query.class_id {
        classes.retain(|c| c.class.id == class_id);
    }
    classes.sort_by(|a, b| {
        a.class
            .name
            .cmp(&b.class.name)
            .then_with(|| a.class.section.cmp(&b.class.section))
    });

    let rates = attendance_rate_by_class(&attendance);
    let mut homework_by_class: HashMap<i64, Vec<HomeworkFact>> = HashMap::new();
    for fact in homework {
        homework_by_class.entry(fact.class_id).or_default().push(fact);
    }

    let items: Vec<ClassAnalyticsItem> = classes
        .into_iter()
        .map(|class| {
            let (total, published, pending) = homework_by_class
                .get(&class.class.id)
                .map(|facts| homework_counts(facts, now))
                .unwrap_or_default();
            ClassAnalyticsItem {
                attendance_percentage: rates.get(&class.class.id).copied().unwrap_or(0.0),
                homework_total: total,
                homework_published: published,
                homework_pending: pending,
                class,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(ClassAnalytics {
        total_classes: items.len() as i64,
        period: query.period_days(),
        date_range: range,
        classes: items,
    })))
}
