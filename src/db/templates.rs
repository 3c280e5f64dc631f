use sea_orm::*;
use std::collections::HashMap;

use crate::models::page;
use crate::models::portfolio;
use crate::models::template::{self, TemplateDetail};

/// Fetch all templates with their pages.
pub async fn get_all_templates<C: ConnectionTrait>(db: &C) -> Result<Vec<TemplateDetail>, DbErr> {
    let templates = template::Entity::find()
        .order_by_asc(template::Column::CreatedAt)
        .order_by_asc(template::Column::Id)
        .all(db)
        .await?;

    with_pages(db, templates).await
}

/// Fetch templates by id, in the order the ids were given. Unknown ids are skipped.
pub async fn get_templates_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
) -> Result<Vec<TemplateDetail>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let templates = template::Entity::find()
        .filter(template::Column::Id.is_in(ids.iter().cloned()))
        .all(db)
        .await?;

    let mut by_id: HashMap<String, TemplateDetail> = with_pages(db, templates)
        .await?
        .into_iter()
        .map(|t| (t.id.clone(), t))
        .collect();

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Fetch a single template by ID.
pub async fn get_template_by_id<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<TemplateDetail>, DbErr> {
    let Some(template) = template::Entity::find_by_id(id.to_owned()).one(db).await? else {
        return Ok(None);
    };

    Ok(with_pages(db, vec![template]).await?.pop())
}

/// Up to `limit` template ids ranked by how many portfolios use them, ties by id.
///
/// Backs the hot list when the cache-side ranking is unavailable.
pub async fn get_most_used_template_ids<C: ConnectionTrait>(
    db: &C,
    limit: usize,
) -> Result<Vec<String>, DbErr> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let ranked: Vec<(String, i64)> = portfolio::Entity::find()
        .select_only()
        .column(portfolio::Column::TemplateId)
        .column_as(portfolio::Column::Id.count(), "uses")
        .group_by(portfolio::Column::TemplateId)
        .order_by_desc(portfolio::Column::Id.count())
        .order_by_asc(portfolio::Column::TemplateId)
        .limit(u64::try_from(limit).unwrap_or(u64::MAX))
        .into_tuple()
        .all(db)
        .await?;

    Ok(ranked.into_iter().map(|(id, _)| id).collect())
}

async fn with_pages<C: ConnectionTrait>(
    db: &C,
    templates: Vec<template::Model>,
) -> Result<Vec<TemplateDetail>, DbErr> {
    if templates.is_empty() {
        return Ok(Vec::new());
    }

    let pages = page::Entity::find()
        .filter(page::Column::TemplateId.is_in(templates.iter().map(|t| t.id.clone())))
        .order_by_asc(page::Column::Position)
        .order_by_asc(page::Column::Id)
        .all(db)
        .await?;

    let mut by_template: HashMap<String, Vec<page::Model>> = HashMap::new();
    for page in pages {
        by_template
            .entry(page.template_id.clone())
            .or_default()
            .push(page);
    }

    Ok(templates
        .into_iter()
        .map(|t| {
            let pages = by_template.remove(&t.id).unwrap_or_default();
            TemplateDetail::new(t, pages)
        })
        .collect())
}
