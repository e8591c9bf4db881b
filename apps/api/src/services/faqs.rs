use std::collections::BTreeMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::faq::FaqRow;

/// Returns all FAQs grouped by category, categories sorted alphabetically.
pub async fn get_all_faqs(pool: &PgPool) -> Result<BTreeMap<String, Vec<FaqRow>>, AppError> {
    let faqs = sqlx::query_as::<_, FaqRow>("SELECT * FROM faqs ORDER BY category, question")
        .fetch_all(pool)
        .await?;
    Ok(group_by_category(faqs))
}

pub fn group_by_category(faqs: Vec<FaqRow>) -> BTreeMap<String, Vec<FaqRow>> {
    let mut grouped: BTreeMap<String, Vec<FaqRow>> = BTreeMap::new();
    for faq in faqs {
        grouped.entry(faq.category.clone()).or_default().push(faq);
    }
    grouped
}

pub async fn add_faq(
    pool: &PgPool,
    question: &str,
    answer: &str,
    category: &str,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO faqs (id, question, answer, category) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(question)
        .bind(answer)
        .bind(category)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Partial update: only the provided fields change.
pub async fn update_faq(
    pool: &PgPool,
    id: Uuid,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<&str>,
) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE faqs
        SET question = COALESCE($2, question),
            answer = COALESCE($3, answer),
            category = COALESCE($4, category)
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(question)
    .bind(answer)
    .bind(category)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("FAQ {id} not found")));
    }
    Ok(())
}

pub async fn delete_faq(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("FAQ {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(question: &str, category: &str) -> FaqRow {
        FaqRow {
            id: Uuid::new_v4(),
            question: question.to_string(),
            answer: "answer".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_group_by_category() {
        let grouped = group_by_category(vec![
            faq("How do I book leave?", "Leave"),
            faq("What is the laptop policy?", "Equipment"),
            faq("How much leave do I get?", "Leave"),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["Leave"].len(), 2);
        assert_eq!(grouped["Equipment"].len(), 1);
    }

    #[test]
    fn test_group_of_empty_is_empty() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
