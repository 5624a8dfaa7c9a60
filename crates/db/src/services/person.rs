use filmcat_core::pagination::Page;
use filmcat_core::types::DbId;
use sqlx::PgConnection;

use crate::entity::WithRelations;
use crate::fields::Filters;
use crate::models::film::{Film, FilmSummary};
use crate::models::person::{CreatePerson, Person, PersonDetail, UpdatePerson};
use crate::repositories::PersonRepo;
use crate::services::CrudService;

/// Person operations plus filmography views.
pub struct PersonService<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PersonService<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    fn crud(&mut self) -> CrudService<'_, Person> {
        CrudService::new(&mut *self.conn)
    }

    /// One 1-based page of persons with pagination metadata.
    pub async fn get_persons_page(
        &mut self,
        page: i64,
        page_size: i64,
    ) -> Result<Page<Person>, sqlx::Error> {
        self.crud().paginated(page, page_size, &Filters::new()).await
    }

    pub async fn get_person(&mut self, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        self.crud().get(id).await
    }

    pub async fn get_person_with_films(
        &mut self,
        id: DbId,
    ) -> Result<Option<WithRelations<Person>>, sqlx::Error> {
        self.crud().get_with_relations(id).await
    }

    /// The person with a summary of every film they are credited on.
    pub async fn get_person_detail(&mut self, id: DbId) -> Result<Option<PersonDetail>, sqlx::Error> {
        let Some(loaded) = self.get_person_with_films(id).await? else {
            return Ok(None);
        };
        Ok(Some(PersonDetail {
            uuid: loaded.entity.id,
            full_name: loaded.entity.full_name,
            films: loaded.relations.films.into_iter().map(FilmSummary::from).collect(),
        }))
    }

    pub async fn search_persons(
        &mut self,
        query: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Person>, sqlx::Error> {
        PersonRepo::search_by_name(&mut *self.conn, query, skip, limit).await
    }

    pub async fn get_person_films(
        &mut self,
        person_id: DbId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Film>, sqlx::Error> {
        PersonRepo::get_films_by_person(&mut *self.conn, person_id, skip, limit).await
    }

    pub async fn create_person(&mut self, input: CreatePerson) -> Result<Person, sqlx::Error> {
        self.crud().create(input).await
    }

    pub async fn update_person(
        &mut self,
        id: DbId,
        input: UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        self.crud().update(id, input).await
    }

    pub async fn delete_person(&mut self, id: DbId) -> Result<bool, sqlx::Error> {
        self.crud().delete(id).await
    }

    pub async fn bulk_delete(&mut self, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        self.crud().bulk_delete(ids).await
    }

    pub async fn count(&mut self) -> Result<i64, sqlx::Error> {
        self.crud().count(&Filters::new()).await
    }
}
