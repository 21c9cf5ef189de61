pub mod decision_tree;
pub mod feature_engineering_service;
pub mod predictor;
pub mod random_forest;
pub mod trainer;
