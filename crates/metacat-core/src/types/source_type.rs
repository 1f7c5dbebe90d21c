use crate::types::catalog_enum;
use serde::{Deserialize, Serialize};

///
/// SourceType
///
/// External system an entity was extracted from.
///

#[remain::sorted]
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Hdfs,
    Hive,
    Impala,
    Mapreduce,
    #[default]
    None,
    Oozie,
    Pig,
    Plugin,
    Sdk,
    Spark,
    Sqoop,
    Yarn,
}

catalog_enum!(SourceType, "source type", {
    Hdfs => "HDFS",
    Hive => "HIVE",
    Impala => "IMPALA",
    Mapreduce => "MAPREDUCE",
    None => "NONE",
    Oozie => "OOZIE",
    Pig => "PIG",
    Plugin => "PLUGIN",
    Sdk => "SDK",
    Spark => "SPARK",
    Sqoop => "SQOOP",
    Yarn => "YARN",
});

impl SourceType {
    /// `None` means no source type was set.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::None)
    }
}
