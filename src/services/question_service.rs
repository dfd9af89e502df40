use serde::Serialize;
use sqlx::PgPool;

use crate::dto::quiz_dto::{CreateQuestionPayload, CreateQuizPayload};
use crate::error::{Error, Result};
use crate::models::question::{Question, QuestionRow};
use crate::utils::slug::{humanize_category_id, normalize_category_id};

#[derive(Debug, Clone, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub category: String,
    pub questions_count: i64,
}

#[derive(Clone)]
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinct category display names for the home screen. Read failures
    /// degrade to an empty list.
    pub async fn list_categories(&self) -> Vec<String> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT id, name FROM categories ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await;

        let rows = match rows {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to list categories");
                return Vec::new();
            }
        };

        let mut seen = std::collections::HashSet::new();
        rows.into_iter()
            .map(|(id, name)| {
                if name.trim().is_empty() {
                    humanize_category_id(&id)
                } else {
                    name
                }
            })
            .filter(|name| !name.trim().is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Loads the questions of one category, addressed by its display name.
    /// Rows whose option list does not decode are skipped rather than
    /// failing the whole fetch. Read failures degrade to an empty list.
    pub async fn questions_by_category(&self, category: &str) -> Vec<Question> {
        let category_id = normalize_category_id(category);

        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"SELECT id, category_id, question_text, options, correct_answer,
                      difficulty, points, position, created_at
               FROM questions
               WHERE category_id = $1
               ORDER BY position"#,
        )
        .bind(&category_id)
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| row.into_question(category))
                .collect(),
            Err(err) => {
                tracing::warn!(error = ?err, %category_id, "failed to load questions");
                Vec::new()
            }
        }
    }

    /// Every quiz with its question count, for the admin overview.
    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"SELECT c.id, COUNT(q.id)
               FROM categories c
               LEFT JOIN questions q ON q.category_id = c.id
               GROUP BY c.id
               ORDER BY c.id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, questions_count)| QuizSummary {
                category: humanize_category_id(&id),
                id,
                questions_count,
            })
            .collect())
    }

    /// Creates or replaces a quiz: the category row is upserted under its
    /// normalized id and the previous question set is dropped before the
    /// new one is written, so saving twice never duplicates questions.
    pub async fn save_quiz(&self, payload: CreateQuizPayload) -> Result<QuizSummary> {
        let category_id = normalize_category_id(&payload.category);
        if category_id.is_empty() {
            return Err(Error::BadRequest(
                "Category name must contain at least one letter or digit".to_string(),
            ));
        }
        for (idx, question) in payload.questions.iter().enumerate() {
            validate_question(idx, question)?;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO categories (id, name) VALUES ($1, $2)
               ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name"#,
        )
        .bind(&category_id)
        .bind(&payload.category)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM questions WHERE category_id = $1")
            .bind(&category_id)
            .execute(&mut *tx)
            .await?;

        for (idx, question) in payload.questions.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO questions
                   (category_id, question_text, options, correct_answer, difficulty, points, position)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(&category_id)
            .bind(&question.question_text)
            .bind(serde_json::to_value(&question.options)?)
            .bind(question.correct_answer)
            .bind(question.difficulty.as_deref().unwrap_or("medium"))
            .bind(question.points.unwrap_or(10))
            .bind(idx as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            %category_id,
            questions = payload.questions.len(),
            "quiz saved"
        );

        Ok(QuizSummary {
            category: payload.category,
            questions_count: payload.questions.len() as i64,
            id: category_id,
        })
    }

    /// Deletes a quiz by category id: questions first, then the category
    /// row, mirroring the write order of the admin tooling.
    pub async fn delete_quiz(&self, category_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM questions WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Quiz '{}' not found", category_id)));
        }

        tx.commit().await?;
        tracing::info!(category_id, "quiz deleted");
        Ok(())
    }

    /// One-time seeding: inserts the built-in quizzes unless any question
    /// already exists. Returns the number of questions written.
    pub async fn seed_sample_questions(&self) -> Result<u64> {
        let already_seeded: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM questions)")
                .fetch_one(&self.pool)
                .await?;
        if already_seeded {
            return Ok(0);
        }

        let mut inserted = 0u64;
        for quiz in seed_quizzes() {
            inserted += quiz.questions.len() as u64;
            self.save_quiz(quiz).await?;
        }
        tracing::info!(inserted, "seeded sample questions");
        Ok(inserted)
    }
}

fn validate_question(idx: usize, question: &CreateQuestionPayload) -> Result<()> {
    if question.options.iter().any(|o| o.trim().is_empty()) {
        return Err(Error::BadRequest(format!(
            "Question {}: options must not be blank",
            idx + 1
        )));
    }
    let correct = question.correct_answer;
    if correct < 0 || correct as usize >= question.options.len() {
        return Err(Error::BadRequest(format!(
            "Question {}: correct answer index {} is out of range",
            idx + 1,
            correct
        )));
    }
    Ok(())
}

fn seed_question(
    text: &str,
    options: &[&str],
    correct_answer: i32,
    difficulty: &str,
) -> CreateQuestionPayload {
    CreateQuestionPayload {
        question_text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer,
        difficulty: Some(difficulty.to_string()),
        points: None,
    }
}

fn seed_quizzes() -> Vec<CreateQuizPayload> {
    vec![
        CreateQuizPayload {
            category: "Geography".to_string(),
            questions: vec![
                seed_question(
                    "What is the capital of Brazil?",
                    &["São Paulo", "Rio de Janeiro", "Brasília", "Salvador"],
                    2,
                    "easy",
                ),
                seed_question(
                    "What is the largest ocean on Earth?",
                    &["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
                    3,
                    "easy",
                ),
            ],
        },
        CreateQuizPayload {
            category: "Science".to_string(),
            questions: vec![
                seed_question(
                    "Which planet is known as the Red Planet?",
                    &["Venus", "Mars", "Jupiter", "Saturn"],
                    1,
                    "easy",
                ),
                seed_question(
                    "Which element has the chemical symbol 'O'?",
                    &["Gold", "Oxygen", "Silver", "Hydrogen"],
                    1,
                    "easy",
                ),
            ],
        },
        CreateQuizPayload {
            category: "Art".to_string(),
            questions: vec![seed_question(
                "Who painted the Mona Lisa?",
                &[
                    "Vincent van Gogh",
                    "Pablo Picasso",
                    "Leonardo da Vinci",
                    "Michelangelo",
                ],
                2,
                "medium",
            )],
        },
        CreateQuizPayload {
            category: "Mathematics".to_string(),
            questions: vec![seed_question(
                "What is 15 x 8?",
                &["120", "125", "115", "130"],
                0,
                "easy",
            )],
        },
        CreateQuizPayload {
            category: "Technology".to_string(),
            questions: vec![seed_question(
                "Which programming language is known for its use in Android development?",
                &["Python", "JavaScript", "Kotlin", "C++"],
                2,
                "medium",
            )],
        },
        CreateQuizPayload {
            category: "Literature".to_string(),
            questions: vec![seed_question(
                "Who wrote 'Romeo and Juliet'?",
                &[
                    "Charles Dickens",
                    "William Shakespeare",
                    "Jane Austen",
                    "Mark Twain",
                ],
                1,
                "medium",
            )],
        },
        CreateQuizPayload {
            category: "Quiz Brasil".to_string(),
            questions: vec![
                seed_question(
                    "Qual é a capital do Brasil?",
                    &["São Paulo", "Rio de Janeiro", "Brasília", "Salvador"],
                    2,
                    "easy",
                ),
                seed_question(
                    "Qual é o maior estado brasileiro em área territorial?",
                    &["Bahia", "Minas Gerais", "Amazonas", "Pará"],
                    2,
                    "medium",
                ),
                seed_question(
                    "Em que ano o Brasil foi descoberto pelos portugueses?",
                    &["1498", "1500", "1502", "1505"],
                    1,
                    "easy",
                ),
                seed_question(
                    "Qual é a moeda oficial do Brasil?",
                    &["Peso", "Real", "Cruzeiro", "Dólar"],
                    1,
                    "easy",
                ),
                seed_question(
                    "Qual dessas cidades NÃO é uma capital de estado brasileiro?",
                    &["Campinas", "Curitiba", "Porto Alegre", "Recife"],
                    0,
                    "medium",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_is_internally_consistent() {
        for quiz in seed_quizzes() {
            assert!(!normalize_category_id(&quiz.category).is_empty());
            for (idx, question) in quiz.questions.iter().enumerate() {
                validate_question(idx, question).expect("seed question must validate");
            }
        }
    }

    #[test]
    fn out_of_range_correct_answer_is_rejected() {
        let question = seed_question("q", &["a", "b"], 2, "easy");
        assert!(validate_question(0, &question).is_err());

        let question = seed_question("q", &["a", "b"], -1, "easy");
        assert!(validate_question(0, &question).is_err());
    }

    #[test]
    fn blank_options_are_rejected() {
        let question = seed_question("q", &["a", "  "], 0, "easy");
        assert!(validate_question(0, &question).is_err());
    }
}
