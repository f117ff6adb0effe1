pub mod favorite_foods;
pub mod hobby_ratings;
pub mod survey_responses;

pub use favorite_foods::Entity as FavoriteFoods;
pub use hobby_ratings::Entity as HobbyRatings;
pub use survey_responses::Entity as SurveyResponses;

// Type aliases
pub type SurveyResponseRecord = survey_responses::Model;
pub type FavoriteFoodRecord = favorite_foods::Model;
pub type HobbyRatingRecord = hobby_ratings::Model;
