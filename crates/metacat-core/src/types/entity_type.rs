use crate::types::catalog_enum;
use serde::{Deserialize, Serialize};

///
/// EntityType
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Database,
    Dataset,
    Directory,
    Field,
    File,
    Operation,
    OperationExecution,
    SubOperation,
    Table,
    View,
}

catalog_enum!(EntityType, "entity type", {
    Database => "DATABASE",
    Dataset => "DATASET",
    Directory => "DIRECTORY",
    Field => "FIELD",
    File => "FILE",
    Operation => "OPERATION",
    OperationExecution => "OPERATION_EXECUTION",
    SubOperation => "SUB_OPERATION",
    Table => "TABLE",
    View => "VIEW",
});
