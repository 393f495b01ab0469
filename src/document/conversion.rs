use crate::activity::Activity;
use crate::error::ConversionError;

/// A trait for custom data models that can be converted into an activity collection.
///
/// This is the seam between the flow model and whatever shape a persistence layer or an
/// older export uses. Implement it on your own structs and hand the result to the
/// editor. Display positions in the result may be stale; run
/// [`renumber`](crate::numbering::renumber) before showing them.
///
/// # Example
///
/// ```rust
/// use flujo::activity::{Activity, StructuralPosition};
/// use flujo::document::IntoActivities;
/// use flujo::error::ConversionError;
///
/// struct Checklist {
///     steps: Vec<String>,
/// }
///
/// impl IntoActivities for Checklist {
///     fn into_activities(self) -> Result<Vec<Activity>, ConversionError> {
///         Ok(self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, step)| {
///                 Activity::new(format!("step-{}", i + 1), StructuralPosition::top_level(i + 1))
///                     .with_name(step)
///             })
///             .collect())
///     }
/// }
///
/// let activities = Checklist { steps: vec!["Open".into(), "Close".into()] }
///     .into_activities()
///     .unwrap();
/// assert_eq!(activities.len(), 2);
/// ```
pub trait IntoActivities {
    /// Consumes the object and converts it into a flat activity collection.
    fn into_activities(self) -> Result<Vec<Activity>, ConversionError>;
}

impl IntoActivities for Vec<Activity> {
    fn into_activities(self) -> Result<Vec<Activity>, ConversionError> {
        Ok(self)
    }
}
