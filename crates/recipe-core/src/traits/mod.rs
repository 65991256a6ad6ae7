//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, HealthProbe, RatingRepository, RecipeQuery, RecipeRepository, RecipeSort,
    RepoResult, SortOrder, UserRepository,
};
