//! `schema`: instructions for a dbt `schema.yml` declaration.

use super::builder::InstructionBuilder;
use super::{PromptArgument, PromptKind, PromptTemplate, or_default, require};
use crate::artifacts::ArtifactId;
use crate::error::PromptError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE_TYPE: &str = "append";
pub const DEFAULT_PARTITION_STRATEGY: &str = "sysdate_1";
pub const DEFAULT_DAGSTER_GROUP: &str = "cmn_engine";
pub const DEFAULT_COLUMNS_INFO: &str = "Cần định nghĩa dựa trên SQL model";

const PREAMBLE: &str = "Bạn là chuyên gia DBT và Data Engineering. Hãy tạo ra một file schema.yml cho DBT model với các yêu cầu sau:";

const GUIDELINES: &[&str] = &[
    "Sử dụng cấu trúc config với alias, schema và meta như template",
    "Thiết lập table_type, partition và max_retries phù hợp",
    "Cấu hình dagster group và depends nếu cần",
    "Thiết lập spark configuration cho execution và test",
    "Định nghĩa tất cả columns với name, description và data_type",
    "Đảm bảo các cột kỹ thuật: tf_sourcing_at, tf_etl_at, data_date được khai báo",
    "Sử dụng các data type phù hợp: string, int, decimal, date, timestamp",
    "Viết description tiếng Việt rõ ràng cho từng cột",
];

const CLOSING: &str = "Hãy tạo ra file schema.yml hoàn chỉnh theo format trên.";

/// Parameters for a schema declaration prompt.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaParams {
    /// Name of the dbt model.
    pub model_name: String,
    /// Description of the model.
    pub description: String,
    /// Table type: append, upsert or scd.
    pub table_type: Option<String>,
    /// Partitioning strategy: t24, way4 or sysdate_1.
    pub partition_strategy: Option<String>,
    /// Dagster group name.
    pub dagster_group: Option<String>,
    /// Column information, comma-separated `name:type:description` triples.
    pub columns_info: Option<String>,
}

impl PromptTemplate for SchemaParams {
    const KIND: PromptKind = PromptKind::Schema;
    const DESCRIPTION: &'static str =
        "Generate a prompt for creating a dbt schema.yml file based on the reference template.";
    const ARGUMENTS: &'static [PromptArgument] = &[
        PromptArgument {
            name: "model_name",
            description: "Name of the dbt model",
            required: true,
        },
        PromptArgument {
            name: "description",
            description: "Description of the model",
            required: true,
        },
        PromptArgument {
            name: "table_type",
            description: "Type of table (append, upsert, scd); defaults to append",
            required: false,
        },
        PromptArgument {
            name: "partition_strategy",
            description: "Partitioning strategy (t24, way4, sysdate_1); defaults to sysdate_1",
            required: false,
        },
        PromptArgument {
            name: "dagster_group",
            description: "Dagster group name; defaults to cmn_engine",
            required: false,
        },
        PromptArgument {
            name: "columns_info",
            description: "Column information (comma-separated name:type:description)",
            required: false,
        },
    ];

    fn validate(&self) -> Result<(), PromptError> {
        require(Self::KIND, "model_name", &self.model_name)?;
        require(Self::KIND, "description", &self.description)
    }

    fn render(&self, reference: &str) -> String {
        InstructionBuilder::new(PREAMBLE)
            .bullets(
                "Yêu cầu",
                &[
                    ("Tên model", self.model_name.trim()),
                    ("Mô tả", self.description.trim()),
                    ("Kiểu bảng", or_default(&self.table_type, DEFAULT_TABLE_TYPE)),
                    (
                        "Chiến lược partition",
                        or_default(&self.partition_strategy, DEFAULT_PARTITION_STRATEGY),
                    ),
                    (
                        "Dagster group",
                        or_default(&self.dagster_group, DEFAULT_DAGSTER_GROUP),
                    ),
                    (
                        "Thông tin cột",
                        or_default(&self.columns_info, DEFAULT_COLUMNS_INFO),
                    ),
                ],
            )
            .fenced(
                "Template tham khảo",
                ArtifactId::Schema.fence_language(),
                reference,
            )
            .numbered("Hướng dẫn", GUIDELINES)
            .closing(CLOSING)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SchemaParams {
        SchemaParams {
            model_name: "egn_cmn_cdp_bal_rpt_byday".into(),
            description: "Daily balance report".into(),
            ..Default::default()
        }
    }

    #[test]
    fn omitted_optionals_render_defaults() {
        let text = params().render("version: 2");
        assert!(text.contains("- Kiểu bảng: append"));
        assert!(text.contains("- Chiến lược partition: sysdate_1"));
        assert!(text.contains("- Dagster group: cmn_engine"));
        assert!(text.contains("- Thông tin cột: Cần định nghĩa dựa trên SQL model"));
        assert!(text.contains("```yaml\nversion: 2\n```"));
    }

    #[test]
    fn supplied_optionals_override_defaults() {
        let p = SchemaParams {
            table_type: Some("upsert".into()),
            partition_strategy: Some("t24".into()),
            dagster_group: Some("  ".into()),
            columns_info: Some("account_id:string:Account number".into()),
            ..params()
        };
        let text = p.render("");
        assert!(text.contains("- Kiểu bảng: upsert"));
        assert!(text.contains("- Chiến lược partition: t24"));
        assert!(text.contains("- Dagster group: cmn_engine"));
        assert!(text.contains("- Thông tin cột: account_id:string:Account number"));
    }

    #[test]
    fn lists_eight_guidelines() {
        let text = params().render("");
        assert!(text.contains("8. Viết description tiếng Việt rõ ràng cho từng cột"));
        assert!(!text.contains("9. "));
    }

    #[test]
    fn blank_model_name_is_rejected() {
        let p = SchemaParams {
            model_name: "   ".into(),
            ..params()
        };
        assert_eq!(
            p.validate(),
            Err(PromptError::MissingParameter {
                kind: "schema",
                parameter: "model_name",
            })
        );
    }
}
