//! Project planning with simulated intelligence.
//!
//! Analysis, code generation, and quick debugging for new projects. The
//! outputs here are static placeholder data shaped like real model output;
//! the LLM-backed operations live in the code assistant instead.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

/// Requirements submitted for a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequirements {
    #[serde(default)]
    pub project_description: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub design_preferences: Option<String>,
}

/// Analysis produced for a set of requirements.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub project_id: String,
    pub analysis: AnalysisDetail,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetail {
    pub recommended_structure: Value,
    pub suggested_components: Vec<String>,
    pub estimated_complexity: String,
}

/// Request to generate a component.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub specifications: Option<Value>,
    #[serde(default)]
    pub existing_code: Option<String>,
}

/// Generated component code plus placement metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGenerationResponse {
    pub generated_code: String,
    pub file_path: String,
    pub dependencies: Vec<String>,
    pub explanations: String,
}

/// Request for a quick debug pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Debug findings and optimization suggestions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub issues: Vec<DebugIssue>,
    pub optimization_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub description: String,
    pub suggested_fix: String,
}

/// Project planner. Stateless; every method is a pure function over its
/// request.
#[derive(Clone, Default)]
pub struct PlannerService;

impl PlannerService {
    pub fn new() -> Self {
        Self
    }

    /// Analyze requirements and produce a recommended project shape.
    pub fn analyze_requirements(&self, requirements: &ProjectRequirements) -> ProjectAnalysis {
        debug!(
            description = requirements.project_description.as_deref().unwrap_or(""),
            "Analyzing project requirements"
        );

        let project_id = format!("proj_{}", Uuid::new_v4().simple());

        ProjectAnalysis {
            project_id,
            analysis: AnalysisDetail {
                recommended_structure: recommended_structure(),
                suggested_components: suggested_components(requirements),
                estimated_complexity: estimated_complexity(requirements).to_string(),
            },
            next_steps: vec![
                "Set up project structure".to_string(),
                "Configure backend services".to_string(),
                "Implement authentication system".to_string(),
                "Create GitHub repository".to_string(),
                "Set up Netlify deployment".to_string(),
            ],
        }
    }

    /// Generate component code for the requested type.
    pub fn generate_code(&self, request: &CodeGenerationRequest) -> CodeGenerationResponse {
        let component_type = request.component_type.as_deref().unwrap_or("");
        let specs = request.specifications.clone().unwrap_or(Value::Null);

        match component_type {
            "react-component" => {
                let name = spec_str(&specs, "name", "Component");
                CodeGenerationResponse {
                    generated_code: react_component_template(&name),
                    file_path: format!("src/components/{name}/{name}.tsx"),
                    dependencies: vec!["react".to_string(), "react-dom".to_string()],
                    explanations: format!(
                        "This component implements a standard React functional component with TypeScript. \
                         It includes a props interface, state management with hooks, and event handling \
                         for the {name} interaction."
                    ),
                }
            }
            "api-route" => {
                let table = spec_str(&specs, "table", "records");
                let endpoint = spec_str(&specs, "endpoint", "records");
                CodeGenerationResponse {
                    generated_code: api_route_template(&table),
                    file_path: format!("src/pages/api/{endpoint}.ts"),
                    dependencies: vec!["next".to_string(), "@supabase/supabase-js".to_string()],
                    explanations: format!(
                        "This API route implements a handler with database integration: GET fetches \
                         all records from the {table} table, POST inserts new records, and unsupported \
                         methods are rejected."
                    ),
                }
            }
            other => CodeGenerationResponse {
                generated_code: "// Generated code will appear here based on specifications"
                    .to_string(),
                file_path: format!("src/{}.ts", if other.is_empty() { "module" } else { other }),
                dependencies: Vec::new(),
                explanations: "Explanation will be generated based on the code and specifications."
                    .to_string(),
            },
        }
    }

    /// Run a quick placeholder debug pass over submitted code.
    pub fn debug_code(&self, request: &DebugRequest) -> DebugResponse {
        debug!(
            project_id = request.project_id.as_deref().unwrap_or(""),
            "Debugging code"
        );

        DebugResponse {
            issues: vec![
                DebugIssue {
                    kind: "error".to_string(),
                    location: "line 15".to_string(),
                    description: "Missing dependency array in useEffect hook".to_string(),
                    suggested_fix: "Add missing dependencies to the useEffect dependency array"
                        .to_string(),
                },
                DebugIssue {
                    kind: "warning".to_string(),
                    location: "line 23".to_string(),
                    description: "Unused variable".to_string(),
                    suggested_fix: "Remove the unused variable or use it in the component"
                        .to_string(),
                },
            ],
            optimization_suggestions: vec![
                "Use React.memo to prevent unnecessary re-renders".to_string(),
                "Implement proper error boundaries".to_string(),
                "Consider using a custom hook for the state logic".to_string(),
                "Add proper TypeScript types for all variables".to_string(),
            ],
        }
    }
}

fn spec_str(specs: &Value, key: &str, default: &str) -> String {
    specs
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn recommended_structure() -> Value {
    json!({
        "frontend": {
            "pages": ["home", "dashboard", "auth", "profile"],
            "components": ["Header", "Footer", "Sidebar", "AuthForm"],
            "styles": ["global", "theme", "components"]
        },
        "backend": {
            "api": ["auth", "users", "projects"],
            "models": ["User", "Project", "Settings"],
            "services": ["authentication", "database", "storage"]
        },
        "deployment": {
            "environments": ["development", "staging", "production"],
            "configurations": ["netlify.toml", "github-actions.yml"]
        }
    })
}

fn suggested_components(requirements: &ProjectRequirements) -> Vec<String> {
    let mut components = vec![
        "Authentication System".to_string(),
        "User Dashboard".to_string(),
        "Project Management Interface".to_string(),
        "Code Editor".to_string(),
        "Preview Component".to_string(),
        "Deployment Pipeline".to_string(),
    ];

    let features = requirements.features.as_deref().unwrap_or(&[]);
    if features.iter().any(|f| f == "real-time") {
        components.push("Real-time Collaboration".to_string());
    }
    if features.iter().any(|f| f == "analytics") {
        components.push("Analytics Dashboard".to_string());
    }

    components
}

fn estimated_complexity(requirements: &ProjectRequirements) -> &'static str {
    let feature_count = requirements.features.as_ref().map(Vec::len).unwrap_or(0);
    if feature_count > 10 {
        "High"
    } else if feature_count > 5 {
        "Medium"
    } else {
        "Low"
    }
}

fn react_component_template(name: &str) -> String {
    format!(
        r#"import React, {{ useState }} from 'react';
import styles from './styles.module.css';

interface {name}Props {{
  title: string;
  onAction?: () => void;
}}

export const {name}: React.FC<{name}Props> = ({{ title, onAction }}) => {{
  const [isActive, setIsActive] = useState(false);

  const handleClick = () => {{
    setIsActive(!isActive);
    if (onAction) {{
      onAction();
    }}
  }};

  return (
    <div className={{styles.container}}>
      <h2>{{title}}</h2>
      <button
        className={{isActive ? styles.activeButton : styles.button}}
        onClick={{handleClick}}
      >
        {{isActive ? 'Active' : 'Inactive'}}
      </button>
    </div>
  );
}};
"#
    )
}

fn api_route_template(table: &str) -> String {
    format!(
        r#"import {{ NextApiRequest, NextApiResponse }} from 'next';
import {{ supabase }} from '../../lib/supabaseClient';

export default async function handler(req: NextApiRequest, res: NextApiResponse) {{
  if (req.method === 'GET') {{
    const {{ data, error }} = await supabase.from('{table}').select('*');
    if (error) return res.status(500).json({{ error: error.message }});
    return res.status(200).json({{ data }});
  }} else if (req.method === 'POST') {{
    const {{ data, error }} = await supabase.from('{table}').insert([req.body]);
    if (error) return res.status(500).json({{ error: error.message }});
    return res.status(201).json({{ data }});
  }} else {{
    return res.status(405).json({{ error: 'Method not allowed' }});
  }}
}}
"#
    )
}
