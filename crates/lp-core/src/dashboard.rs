use crate::courses::CourseRepository;
use crate::enrolments::EnrolmentRepository;
use crate::error::{CourseError, DashboardError, EnrolmentError, LearnerError};
use crate::learners::LearnerRepository;
use crate::progress::aggregate;
use crate::store::Store;
use crate::types::{
    Course, CourseFilter, CourseId, CreateCourseInput, CreateLearnerInput, EnrolInput, Enrolment,
    EnrolmentId, Learner, LearnerId, LearnerProgress, LearnerProgressPage, ProgressFilters,
    ProgressQuery,
};
use crate::validation::{validate_course_name, validate_learner_name, validate_progress};
use tracing::debug;

pub struct Dashboard<S: Store> {
    store: S,
}

impl<S: Store> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn progress(&self) -> ProgressApi<'_, S> {
        ProgressApi { core: self }
    }

    pub fn courses(&self) -> CoursesApi<'_, S> {
        CoursesApi { core: self }
    }

    pub fn learners(&self) -> LearnersApi<'_, S> {
        LearnersApi { core: self }
    }

    pub fn enrolments(&self) -> EnrolmentsApi<'_, S> {
        EnrolmentsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs `f` inside one store transaction; every call made through the
    /// dashboard within `f` commits or rolls back together.
    pub fn transaction<T, F>(&self, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>,
    {
        self.store.with_tx(|_| f(self))
    }
}

pub struct ProgressApi<'a, S: Store> {
    core: &'a Dashboard<S>,
}

impl<S: Store> ProgressApi<'_, S> {
    pub fn learner_progress(
        &self,
        query: &ProgressQuery,
    ) -> Result<Vec<LearnerProgress>, DashboardError> {
        self.core
            .store
            .with_read_tx(|store| load_learner_progress(store, query))
    }

    /// Learners, the full course list and the echoed filters in one payload,
    /// read from a single snapshot.
    pub fn page(&self, filters: ProgressFilters) -> Result<LearnerProgressPage, DashboardError> {
        let query = ProgressQuery::from_filters(&filters);
        let (learners, courses) = self.core.store.with_read_tx(|store| {
            let learners = load_learner_progress(store, &query)?;
            let courses = store.courses().list()?;
            Ok((learners, courses))
        })?;
        Ok(LearnerProgressPage {
            learners,
            courses,
            filters,
        })
    }
}

fn load_learner_progress<S: Store>(
    store: &S,
    query: &ProgressQuery,
) -> Result<Vec<LearnerProgress>, DashboardError> {
    if query.course == CourseFilter::Unmatched {
        return Ok(Vec::new());
    }
    let learners = store.learners().list()?;
    let enrolments = store
        .enrolments()
        .list_with_courses(query.course.course_id())?;
    let rows = aggregate(learners, enrolments, query);
    debug!(
        course = ?query.course,
        sort = ?query.sort,
        learners = rows.len(),
        "aggregated learner progress"
    );
    Ok(rows)
}

pub struct CoursesApi<'a, S: Store> {
    core: &'a Dashboard<S>,
}

impl<S: Store> CoursesApi<'_, S> {
    pub fn create(&self, input: CreateCourseInput) -> Result<Course, DashboardError> {
        let name = validate_course_name(&input.name)?;
        Ok(self.core.store.courses().create(CreateCourseInput { name })?)
    }

    pub fn get(&self, id: CourseId) -> Result<Course, DashboardError> {
        self.core
            .store
            .courses()
            .get(id)?
            .ok_or_else(|| CourseError::NotFound.into())
    }

    pub fn list(&self) -> Result<Vec<Course>, DashboardError> {
        Ok(self.core.store.courses().list()?)
    }

    pub fn rename(&self, id: CourseId, name: &str) -> Result<Course, DashboardError> {
        let name = validate_course_name(name)?;
        Ok(self.core.store.courses().rename(id, name)?)
    }

    pub fn delete(&self, id: CourseId) -> Result<(), DashboardError> {
        Ok(self.core.store.courses().delete(id)?)
    }
}

pub struct LearnersApi<'a, S: Store> {
    core: &'a Dashboard<S>,
}

impl<S: Store> LearnersApi<'_, S> {
    pub fn create(&self, input: CreateLearnerInput) -> Result<Learner, DashboardError> {
        let input = CreateLearnerInput {
            firstname: validate_learner_name("firstname", &input.firstname)?,
            lastname: validate_learner_name("lastname", &input.lastname)?,
        };
        Ok(self.core.store.learners().create(input)?)
    }

    pub fn get(&self, id: LearnerId) -> Result<Learner, DashboardError> {
        self.core
            .store
            .learners()
            .get(id)?
            .ok_or_else(|| LearnerError::NotFound.into())
    }

    pub fn list(&self) -> Result<Vec<Learner>, DashboardError> {
        Ok(self.core.store.learners().list()?)
    }

    pub fn delete(&self, id: LearnerId) -> Result<(), DashboardError> {
        Ok(self.core.store.learners().delete(id)?)
    }
}

pub struct EnrolmentsApi<'a, S: Store> {
    core: &'a Dashboard<S>,
}

impl<S: Store> EnrolmentsApi<'_, S> {
    pub fn enrol(&self, input: EnrolInput) -> Result<Enrolment, DashboardError> {
        let progress = validate_progress(input.progress)?;
        Ok(self
            .core
            .store
            .enrolments()
            .enrol(EnrolInput { progress, ..input })?)
    }

    pub fn get(&self, id: EnrolmentId) -> Result<Enrolment, DashboardError> {
        self.core
            .store
            .enrolments()
            .get(id)?
            .ok_or_else(|| EnrolmentError::NotFound.into())
    }

    pub fn update_progress(
        &self,
        id: EnrolmentId,
        progress: f64,
    ) -> Result<Enrolment, DashboardError> {
        let progress = validate_progress(progress)?;
        Ok(self.core.store.enrolments().update_progress(id, progress)?)
    }
}
