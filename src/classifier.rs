//! Defines the `Classifier` trait and the boosting ensemble.

mod classifier_trait;
mod customizer;
mod grouped;
mod boosting_classifier;


pub use classifier_trait::Classifier;
pub use customizer::ClassifierCustomizer;
pub use boosting_classifier::BoostingClassifier;
