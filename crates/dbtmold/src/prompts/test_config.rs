//! `test-config`: instructions for a dbt test configuration.
//!
//! Besides the usual requirements, reference and guideline blocks, this kind
//! lists the test macros a model may use (built-in, `dbt_utils`,
//! `dbt_expectations`) and a few common patterns.

use super::builder::InstructionBuilder;
use super::{PromptArgument, PromptKind, PromptTemplate, or_default, require};
use crate::artifacts::ArtifactId;
use crate::error::PromptError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEST_REQUIREMENTS: &str = "Test cơ bản cho data quality";
pub const DEFAULT_TEST_COLUMNS: &str = "Tất cả cột quan trọng";
pub const DEFAULT_TEST_TYPE: &str = "basic";

const PREAMBLE: &str = "Bạn là chuyên gia DBT và Data Quality. Hãy tạo ra file test configuration cho DBT model với các yêu cầu sau:";

const AVAILABLE_TESTS: &str = "\
1. **Built-in tests:**
   - `unique`: Kiểm tra tính duy nhất
   - `not_null`: Kiểm tra không null
   - `accepted_values`: Kiểm tra giá trị trong danh sách cho phép
   - `relationships`: Kiểm tra foreign key

2. **DBT Utils tests:**
   - `dbt_utils.expression_is_true`: Test business logic với expression tùy chỉnh
   - `dbt_utils.unique_combination_of_columns`: Test unique trên nhiều cột

3. **DBT Expectations tests:**
   - `dbt_expectations.expect_column_values_to_be_unique`: Test unique nâng cao
   - `dbt_expectations.expect_column_values_to_be_between`: Test giá trị trong khoảng
   - `dbt_expectations.expect_column_values_to_match_regex`: Test format dữ liệu";

const GUIDELINES: &[&str] = &[
    "Thiết lập test ở cấp model (model tests) cho business logic",
    "Thiết lập test ở cấp column (column tests) cho data quality",
    "Sử dụng `row_condition` để test chỉ trên dữ liệu mới: `\"data_date = date('{{ var('datadate') }}')\"`",
    "Phân loại test theo tags:\n   - `[required]`: Test bắt buộc, fail sẽ dừng job\n   - `[optional]`: Test tùy chọn, fail không ảnh hưởng job",
    "Thêm `meta.description` để mô tả test case rõ ràng",
    "Cấu hình spark resources phù hợp cho test",
    "Set `test.include: true` để enable test execution",
];

const PATTERNS: &str = "\
- Test unique: `dbt_expectations.expect_column_values_to_be_unique`
- Test business rule: `dbt_utils.expression_is_true`
- Test data range: `dbt_expectations.expect_column_values_to_be_between`
- Test not null: `not_null`";

const CLOSING: &str =
    "Hãy tạo ra file test configuration hoàn chỉnh theo format trên với các test case phù hợp.";

/// Parameters for a test configuration prompt.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfigParams {
    /// Name of the dbt model to test.
    pub model_name: String,
    /// Description of the model.
    pub description: String,
    /// Specific test requirements (business rules, validations).
    pub test_requirements: Option<String>,
    /// Column names to test, comma-separated.
    pub test_columns: Option<String>,
    /// Type of test: basic, advanced or custom.
    pub test_type: Option<String>,
}

impl PromptTemplate for TestConfigParams {
    const KIND: PromptKind = PromptKind::TestConfig;
    const DESCRIPTION: &'static str =
        "Generate a prompt for creating a dbt test configuration based on the reference template.";
    const ARGUMENTS: &'static [PromptArgument] = &[
        PromptArgument {
            name: "model_name",
            description: "Name of the dbt model to test",
            required: true,
        },
        PromptArgument {
            name: "description",
            description: "Description of the model",
            required: true,
        },
        PromptArgument {
            name: "test_requirements",
            description: "Specific test requirements (business rules, validations)",
            required: false,
        },
        PromptArgument {
            name: "test_columns",
            description: "Column names to test (comma-separated)",
            required: false,
        },
        PromptArgument {
            name: "test_type",
            description: "Type of test (basic, advanced, custom); defaults to basic",
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
                    (
                        "Yêu cầu test",
                        or_default(&self.test_requirements, DEFAULT_TEST_REQUIREMENTS),
                    ),
                    (
                        "Các cột cần test",
                        or_default(&self.test_columns, DEFAULT_TEST_COLUMNS),
                    ),
                    ("Loại test", or_default(&self.test_type, DEFAULT_TEST_TYPE)),
                ],
            )
            .fenced(
                "Template tham khảo",
                ArtifactId::TestConfig.fence_language(),
                reference,
            )
            .section("Các loại test có sẵn", AVAILABLE_TESTS)
            .numbered("Hướng dẫn", GUIDELINES)
            .section("Ví dụ test patterns", PATTERNS)
            .closing(CLOSING)
            .build()
    }
}
