use crate::{
    error::{Error, ValidationError},
    registry::{ClassEntries, Registry},
    traits::MetaClass,
};

impl Registry {
    /// Check every required property and relation of `instance`, stopping
    /// at the first violation.
    ///
    /// A required property fails when its value is null, an empty string,
    /// or an empty collection; a required relation fails when it connects
    /// no entities.
    pub fn validate_required(&self, instance: &dyn MetaClass) -> Result<(), Error> {
        let entries = self.entries_of(instance)?;

        match first_violation(&entries, instance)? {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }

    /// Same checks as [`validate_required`](Self::validate_required), but
    /// every violation is collected. An empty list means the instance passed.
    pub fn validate_required_all(
        &self,
        instance: &dyn MetaClass,
    ) -> Result<Vec<ValidationError>, Error> {
        let entries = self.entries_of(instance)?;
        let mut violations = Vec::new();

        visit_required(&entries, instance, |violation| {
            violations.push(violation);
            true
        })?;

        Ok(violations)
    }
}

fn first_violation(
    entries: &ClassEntries,
    instance: &dyn MetaClass,
) -> Result<Option<ValidationError>, Error> {
    let mut first = None;

    visit_required(entries, instance, |violation| {
        first = Some(violation);
        false
    })?;

    Ok(first)
}

// Calls `on_violation` for each failed requirement in registry order until
// it returns false.
fn visit_required(
    entries: &ClassEntries,
    instance: &dyn MetaClass,
    mut on_violation: impl FnMut(ValidationError) -> bool,
) -> Result<(), Error> {
    let class = instance.class_model().name;

    for property in entries.properties().iter().filter(|p| p.is_required()) {
        if property.value_of(instance)?.is_blank() {
            let violation = ValidationError::MissingProperty {
                class,
                attribute: property.attribute_name(),
            };
            if !on_violation(violation) {
                return Ok(());
            }
        }
    }

    for relation in entries.relations().iter().filter(|r| r.is_required()) {
        if relation.connected_entities(instance)?.is_empty() {
            let violation = ValidationError::MissingRelation {
                class,
                field: relation.field(),
            };
            if !on_violation(violation) {
                return Ok(());
            }
        }
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, ValidationError},
        registry::Registry,
        test_fixtures::{Dataset, script},
    };

    #[test]
    fn complete_instance_passes() {
        let registry = Registry::new();

        registry
            .validate_required(&script("s-1", "load.sql"))
            .expect("complete script should validate");
        registry
            .validate_required(&Dataset::sample("d-1"))
            .expect("complete dataset should validate");
    }

    #[test]
    fn fail_fast_reports_first_violation_in_registry_order() {
        let registry = Registry::new();
        let mut script = script("", "");
        script.base.source_type = None;

        let err = registry
            .validate_required(&script)
            .expect_err("blank script should fail");

        let Error::Validation(violation) = err else {
            panic!("blank script should fail validation, got {err:?}");
        };
        assert_eq!(
            violation,
            ValidationError::MissingProperty {
                class: "Script",
                attribute: "name",
            }
        );
    }

    #[test]
    fn aggregate_collects_every_violation() {
        let registry = Registry::new();
        let mut script = script("", "");
        script.base.source_type = None;

        let violations = registry
            .validate_required_all(&script)
            .expect("aggregate validation should run");
        let attributes: Vec<_> = violations
            .iter()
            .filter_map(ValidationError::attribute)
            .collect();

        assert_eq!(attributes, vec!["name", "identity", "sourceType"]);
    }

    #[test]
    fn empty_required_relation_fails() {
        let registry = Registry::new();
        let mut dataset = Dataset::sample("d-1");
        dataset.sources.clear();

        let err = registry
            .validate_required(&dataset)
            .expect_err("dataset without sources should fail");

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingRelation {
                class: "Dataset",
                field: "sources",
            })
        ));
    }
}
