mod favorites;
mod recipes;
mod users;

pub use favorites::FavoriteRepository;
pub use recipes::RecipeRepository;
pub use users::UserRepository;
