//! Results view: the fixed career recommendations shown after an assessment.
//!
//! The recommendations are static: they do not depend on the submitted record.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CareerPath {
    pub title: &'static str,
    /// Match percentage, 0 to 100.
    pub match_percent: u8,
    pub description: &'static str,
    pub key_skills: &'static [&'static str],
    pub avg_salary: &'static str,
    pub growth_rate: &'static str,
    /// Opening question for the advisor chat about this path.
    pub chat_topic: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGap {
    pub skill: &'static str,
    pub proficiency: &'static str,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Course,
    Tutorial,
    Certification,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningResource {
    pub name: &'static str,
    pub provider: &'static str,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoadmapTask {
    pub name: &'static str,
    pub completed: bool,
}

/// One phase of the suggested career roadmap.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoadmapPhase {
    pub title: &'static str,
    pub duration: &'static str,
    pub completed: bool,
    /// The phase to focus on now. At most one phase is current.
    pub current: bool,
    pub tasks: &'static [RoadmapTask],
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub top_career_paths: Vec<CareerPath>,
    pub skill_gaps: Vec<SkillGap>,
    pub learning_resources: Vec<LearningResource>,
    pub roadmap: Vec<RoadmapPhase>,
}

struct PathSeed {
    title: &'static str,
    match_percent: u8,
    description: &'static str,
    key_skills: &'static [&'static str],
    avg_salary: &'static str,
    growth_rate: &'static str,
}

const CAREER_PATHS: &[PathSeed] = &[
    PathSeed {
        title: "Full Stack Developer",
        match_percent: 94,
        description: "Build complete web applications working on both frontend and backend.",
        key_skills: &["JavaScript", "React", "Node.js", "Databases", "Cloud Services"],
        avg_salary: "$105,000",
        growth_rate: "19%",
    },
    PathSeed {
        title: "Data Scientist",
        match_percent: 85,
        description: "Analyze complex data to help organizations make better decisions.",
        key_skills: &["Python", "Statistics", "Machine Learning", "Data Visualization", "SQL"],
        avg_salary: "$122,000",
        growth_rate: "22%",
    },
    PathSeed {
        title: "Cloud Solutions Architect",
        match_percent: 80,
        description: "Design and implement cloud-based solutions for organizations.",
        key_skills: &[
            "AWS/Azure/GCP",
            "Infrastructure as Code",
            "Networking",
            "Security",
            "Containerization",
        ],
        avg_salary: "$135,000",
        growth_rate: "15%",
    },
];

const SKILL_GAPS: &[SkillGap] = &[
    SkillGap {
        skill: "Backend Development",
        proficiency: "Intermediate",
        recommendation: "Take a Node.js or Django course",
    },
    SkillGap {
        skill: "Cloud Services",
        proficiency: "Beginner",
        recommendation: "Complete AWS Certified Developer certification",
    },
    SkillGap {
        skill: "CI/CD Pipeline",
        proficiency: "Beginner",
        recommendation: "Learn GitHub Actions and Jenkins",
    },
    SkillGap {
        skill: "System Design",
        proficiency: "Beginner",
        recommendation: "Take a system design course",
    },
    SkillGap {
        skill: "Docker & Kubernetes",
        proficiency: "Novice",
        recommendation: "Complete Docker & Kubernetes bootcamp",
    },
    SkillGap {
        skill: "AI/ML Fundamentals",
        proficiency: "Novice",
        recommendation: "Start with AI/ML basics course",
    },
];

const LEARNING_RESOURCES: &[LearningResource] = &[
    LearningResource {
        name: "Full Stack Web Development Bootcamp",
        provider: "Udemy",
        kind: ResourceKind::Course,
    },
    LearningResource {
        name: "Build a REST API with Node.js",
        provider: "freeCodeCamp",
        kind: ResourceKind::Tutorial,
    },
    LearningResource {
        name: "AWS Certified Developer - Associate",
        provider: "A Cloud Guru",
        kind: ResourceKind::Certification,
    },
    LearningResource {
        name: "System Design Interview Course",
        provider: "Educative",
        kind: ResourceKind::Course,
    },
    LearningResource {
        name: "Docker & Kubernetes: The Complete Guide",
        provider: "Udemy",
        kind: ResourceKind::Course,
    },
];

const fn task(name: &'static str, completed: bool) -> RoadmapTask {
    RoadmapTask { name, completed }
}

const ROADMAP: &[RoadmapPhase] = &[
    RoadmapPhase {
        title: "Foundation",
        duration: "3-6 months",
        completed: true,
        current: false,
        tasks: &[
            task("Learn HTML, CSS & JavaScript fundamentals", true),
            task("Build basic web projects", true),
            task("Learn Git version control", true),
        ],
    },
    RoadmapPhase {
        title: "Frontend Development",
        duration: "6-9 months",
        completed: false,
        current: true,
        tasks: &[
            task("Master React.js", true),
            task("Learn state management (Redux/Context)", false),
            task("Build responsive UI with CSS frameworks", true),
        ],
    },
    RoadmapPhase {
        title: "Backend Development",
        duration: "6-9 months",
        completed: false,
        current: false,
        tasks: &[
            task("Learn Node.js fundamentals", false),
            task("Build RESTful APIs", false),
            task("Work with databases (SQL/NoSQL)", false),
        ],
    },
    RoadmapPhase {
        title: "Full Stack Integration",
        duration: "3-6 months",
        completed: false,
        current: false,
        tasks: &[
            task("Connect frontend and backend", false),
            task("Implement authentication & authorization", false),
            task("Deploy full stack applications", false),
        ],
    },
    RoadmapPhase {
        title: "Specialized Skills",
        duration: "6-12 months",
        completed: false,
        current: false,
        tasks: &[
            task("Learn cloud services (AWS/Azure/GCP)", false),
            task("Implement CI/CD pipelines", false),
            task("Master DevOps practices", false),
        ],
    },
];

pub fn chat_topic(career_title: &str) -> String {
    format!("Tell me more about becoming a {career_title}")
}

/// Career paths are ordered best match first.
pub fn recommendations() -> Recommendations {
    let mut top_career_paths: Vec<CareerPath> = CAREER_PATHS
        .iter()
        .map(|seed| CareerPath {
            title: seed.title,
            match_percent: seed.match_percent,
            description: seed.description,
            key_skills: seed.key_skills,
            avg_salary: seed.avg_salary,
            growth_rate: seed.growth_rate,
            chat_topic: chat_topic(seed.title),
        })
        .collect();
    top_career_paths.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));

    Recommendations {
        top_career_paths,
        skill_gaps: SKILL_GAPS.to_vec(),
        learning_resources: LEARNING_RESOURCES.to_vec(),
        roadmap: ROADMAP.to_vec(),
    }
}

/// GET /api/v1/results
pub async fn handle_results() -> Json<Recommendations> {
    Json(recommendations())
}
