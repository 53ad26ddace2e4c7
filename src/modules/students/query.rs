use registrar_client::query::{
    FieldSelector, GroupOperator, ID_FIELD, OrderBy, PagingInfo, Predicate, WhereGroup,
};
use registrar_client::FetchParams;
use registrar_core::pagination::DEFAULT_LIMIT;
use registrar_models::{SortDirection, StudentField, StudentFilters, StudentStatus, StudentYear};

/// Table holding student records in the record store.
pub const STUDENT_TABLE: &str = "student";

/// Fields a search term is matched against, OR-ed together.
pub const SEARCH_FIELDS: [StudentField; 4] = [
    StudentField::FirstName,
    StudentField::LastName,
    StudentField::Email,
    StudentField::Program,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchStudentsOptions {
    pub search_term: String,
    pub status: Option<StudentStatus>,
    pub year: Option<StudentYear>,
    pub limit: u64,
    pub offset: u64,
    pub sort_field: StudentField,
    pub sort_direction: SortDirection,
}

impl Default for FetchStudentsOptions {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status: None,
            year: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort_field: StudentField::LastName,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl FetchStudentsOptions {
    /// Options for one page of a filtered list.
    pub fn from_filters(filters: &StudentFilters, limit: u64, offset: u64) -> Self {
        Self {
            search_term: filters.search_term.clone(),
            status: filters.status,
            year: filters.year,
            limit,
            offset,
            sort_field: filters.sort_field,
            sort_direction: filters.sort_direction,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn sorted(mut self, field: StudentField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }
}

/// Translates list options into a record store query.
///
/// `where` is sent whenever any condition exists, even if only the search
/// group is populated; `whereGroups` only carries the search term.
pub fn build_fetch_params(options: &FetchStudentsOptions) -> FetchParams {
    let search = options.search_term.trim();

    let mut conditions = Vec::new();
    if let Some(status) = options.status {
        conditions.push(Predicate::exact(StudentField::Status.as_str(), status.as_str()));
    }
    if let Some(year) = options.year {
        conditions.push(Predicate::exact(StudentField::Year.as_str(), year.as_str()));
    }

    let where_groups = (!search.is_empty()).then(|| {
        vec![WhereGroup {
            operator: GroupOperator::Or,
            conditions: SEARCH_FIELDS
                .iter()
                .map(|field| Predicate::contains(field.as_str(), search))
                .collect(),
        }]
    });

    let has_conditions = !conditions.is_empty() || where_groups.is_some();

    FetchParams {
        fields: student_fields(),
        order_by: vec![OrderBy {
            field: options.sort_field.as_str().to_string(),
            direction: options.sort_direction.as_str().to_string(),
        }],
        paging_info: PagingInfo {
            limit: options.limit,
            offset: options.offset,
        },
        conditions: has_conditions.then_some(conditions),
        where_groups,
    }
}

/// `Id` followed by every student attribute.
pub fn student_fields() -> Vec<FieldSelector> {
    std::iter::once(FieldSelector::new(ID_FIELD))
        .chain(StudentField::ALL.iter().map(|f| FieldSelector::new(f.as_str())))
        .collect()
}
