//! Static copy and data rendered by the page sections.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub tagline: &'static str,
    pub headline: &'static str,
    pub location: &'static str,
    pub email: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Saran M",
    role: "Digital Transformation Specialist",
    tagline: "Saran M • Digital Transformation Specialist",
    headline: "I build scalable interfaces & resilient cloud systems",
    location: "Chennai, India",
    email: "shreecharan1305@gmail.com",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    /// Element id of the target section, without `#`.
    pub section: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { label: "About", section: "about" },
    NavItem { label: "Skills", section: "skills" },
    NavItem { label: "Experience", section: "experience" },
    NavItem { label: "Projects", section: "projects" },
    NavItem { label: "DevOps", section: "devops" },
    NavItem { label: "Contact", section: "contact" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub section: &'static str,
}

pub const HERO_ACTIONS: [CallToAction; 2] = [
    CallToAction { label: "View My Work", section: "projects" },
    CallToAction { label: "Get In Touch", section: "contact" },
];

pub const ABOUT_TITLE: &str = "Transforming Ideas Into Digital Excellence";

pub const ABOUT_PARAGRAPHS: [&str; 3] = [
    "With over 5 years of experience in digital transformation, I specialize in architecting scalable front-end solutions and building resilient cloud infrastructure that powers modern enterprises.",
    "I lead cross-functional teams to deliver high-impact projects that bridge the gap between complex technical requirements and seamless user experiences. My expertise spans from crafting pixel-perfect React applications to orchestrating sophisticated CI/CD pipelines across multi-cloud environments.",
    "I believe in building systems that scale, not just technically, but in a way that empowers teams and accelerates business growth.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 3] = [
    Stat { value: "5+", label: "Years Experience" },
    Stat { value: "20+", label: "Projects Delivered" },
    Stat { value: "100%", label: "Client Satisfaction" },
];

/// Profile photos cycled while the portrait is hovered. Paths are relative to
/// the site root and go through `config::asset_path`.
pub const PROFILE_SLIDES: [&str; 3] = [
    "/profile.png",
    "/profile-slideshow/slide-2.png",
    "/profile-slideshow/slide-3.png",
];

/// Seconds each slide stays up while hovered.
pub const SLIDE_PERIOD_SECONDS: f32 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillCategory {
    pub title: &'static str,
    pub color: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILL_CATEGORIES: [SkillCategory; 5] = [
    SkillCategory {
        title: "Frontend Architecture",
        color: "#3b82f6",
        skills: &[
            "React.js",
            "Redux",
            "Redux-Saga",
            "Material UI",
            "Bootstrap",
            "JavaScript",
            "HTML5",
            "CSS3",
        ],
    },
    SkillCategory {
        title: "Cloud Ecosystem",
        color: "#8b5cf6",
        skills: &["AWS", "Azure", "GCP", "DigitalOcean", "Vercel", "Netlify"],
    },
    SkillCategory {
        title: "DevOps & Infrastructure",
        color: "#f59e0b",
        skills: &[
            "Jenkins",
            "Docker",
            "Terraform",
            "Ansible",
            "SaltStack",
            "Git",
            "Linux",
            "YAML",
        ],
    },
    SkillCategory {
        title: "Backend & Scripting",
        color: "#ec4899",
        skills: &["Node.js", "Python", "Ruby", "Shell Scripting"],
    },
    SkillCategory {
        title: "Observability & Monitoring",
        color: "#10b981",
        skills: &["Splunk", "Prometheus", "Grafana", "ELK Stack"],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub highlights: [&'static str; 4],
    pub technologies: &'static [&'static str],
}

const COMPANY: &str = "Ideassion Technology Solutions";
const CLOUD_LEAD_STACK: &[&str] = &[
    "AWS",
    "Azure",
    "GCP",
    "DigitalOcean",
    "DevOps",
    "React.js",
    "JavaScript",
];

pub const EXPERIENCES: [Experience; 4] = [
    Experience {
        role: "Digital Transformation Specialist",
        company: COMPANY,
        period: "Aug 2025 - Present",
        location: "Chennai, Tamil Nadu, India (Hybrid)",
        description: "Driving R&D and cross-functional collaborations while architecting cloud and DevOps solutions. Leading digital transformation initiatives.",
        highlights: [
            "Spearheading Research and Development (R&D) initiatives",
            "Driving leadership development and cross-functional collaborations",
            "Architecting multi-cloud solutions on AWS, Azure, GCP, and DigitalOcean",
            "Specializing in DevOps practices and modern web technologies (React.js)",
        ],
        technologies: CLOUD_LEAD_STACK,
    },
    Experience {
        role: "Senior Digital Transformation Engineer",
        company: COMPANY,
        period: "Aug 2024 - Aug 2025",
        location: "Chennai, Tamil Nadu, India (Hybrid)",
        description: "Led cloud infrastructure management and advanced front-end engineering for enterprise solutions.",
        highlights: [
            "Managed complex cloud environments across AWS, Azure, and GCP",
            "Optimized DevOps workflows for improved deployment efficiency",
            "Developed scalable applications using React.js and JavaScript",
            "Mentored junior engineers and led technical decision making",
        ],
        technologies: CLOUD_LEAD_STACK,
    },
    Experience {
        role: "Digital Transformation Engineer",
        company: COMPANY,
        period: "May 2021 - Aug 2024",
        location: "Chennai, Tamil Nadu, India (Hybrid)",
        description: "Core contributor to full-stack development and cloud migrations.",
        highlights: [
            "Built responsive user interfaces with React.js and CSS",
            "Implemented backend services using Node.js",
            "Managed cloud resources on AWS and Microsoft Azure",
            "Collaborated on full lifecycle software development",
        ],
        technologies: &["React.js", "Node.js", "AWS", "Azure", "JavaScript", "CSS"],
    },
    Experience {
        role: "Digital Transformation Intern",
        company: COMPANY,
        period: "Feb 2021 - May 2021",
        location: "Chennai, Tamil Nadu, India (On-site)",
        description: "Gained hands-on experience in modern web development and front-end technologies.",
        highlights: [
            "Developed foundational skills in HTML, CSS, and JavaScript",
            "Assisted in building React.js components",
            "Participated in agile development processes",
            "Learned industry best practices for software delivery",
        ],
        technologies: &["React.js", "JavaScript", "HTML", "CSS"],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectDomain {
    Development,
    CloudDevops,
}

impl ProjectDomain {
    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "Full Stack Development",
            Self::CloudDevops => "Cloud & DevOps",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Domain(ProjectDomain),
}

impl ProjectFilter {
    pub const TABS: [ProjectFilter; 3] = [
        Self::All,
        Self::Domain(ProjectDomain::Development),
        Self::Domain(ProjectDomain::CloudDevops),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Projects",
            Self::Domain(domain) => domain.label(),
        }
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Domain(domain) => project.domain == domain,
        }
    }

    pub fn apply(self) -> impl Iterator<Item = &'static Project> {
        PROJECTS.iter().filter(move |project| self.matches(project))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: u8,
    pub title: &'static str,
    pub domain: ProjectDomain,
    pub category: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub metrics: [Metric; 2],
}

pub static PROJECTS: [Project; 4] = [
    Project {
        id: 1,
        title: "GRC Application Deployment",
        domain: ProjectDomain::CloudDevops,
        category: "Cloud Infrastructure",
        color: "#3b82f6",
        description: "Deployed a secure, full-stack GRC application on AWS with automated CI/CD pipelines and disaster recovery.",
        technologies: &["AWS EC2", "Jenkins", "Splunk", "Nginx", "SSL"],
        metrics: [
            Metric { label: "Uptime", value: "99.99%" },
            Metric { label: "Backup", value: "Auto S3" },
        ],
    },
    Project {
        id: 2,
        title: "Talent Search Application",
        domain: ProjectDomain::CloudDevops,
        category: "DevOps Automation",
        color: "#8b5cf6",
        description: "Orchestrated auto-scaling AWS architecture for a high-traffic talent search platform with comprehensive monitoring.",
        technologies: &["AWS AutoScaling", "CloudWatch", "PostgreSQL", "Linux"],
        metrics: [
            Metric { label: "Scaling", value: "Dynamic" },
            Metric { label: "Security", value: "IAM/SES" },
        ],
    },
    Project {
        id: 3,
        title: "Data-Driven Alarm Control",
        domain: ProjectDomain::Development,
        category: "Frontend Engineering",
        color: "#f59e0b",
        description: "Engineered a complex calculation engine and visualization platform for real-time industrial alarm management.",
        technologies: &["React.js", "Algorithms", "Data Viz", "UI/UX"],
        metrics: [
            Metric { label: "Latency", value: "Real-time" },
            Metric { label: "Reliability", value: "100%" },
        ],
    },
    Project {
        id: 4,
        title: "Market Demand Forecast",
        domain: ProjectDomain::Development,
        category: "Business Intelligence",
        color: "#10b981",
        description: "Developed an interactive forecasting dashboard visualizing 48 months of data with dynamic charts and complex tables.",
        technologies: &["React.js", "Chart.js", "REST APIs", "Syncfusion"],
        metrics: [
            Metric { label: "Data", value: "48 Months" },
            Metric { label: "Trends", value: "Predictive" },
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub handle: &'static str,
    pub href: &'static str,
}

impl ContactLink {
    /// Everything but mail opens in a new tab.
    pub fn opens_new_tab(&self) -> bool {
        !self.href.starts_with("mailto:")
    }
}

pub const CONTACT_LINKS: [ContactLink; 3] = [
    ContactLink {
        label: "GitHub",
        handle: "@saran1305",
        href: "https://github.com/saran1305",
    },
    ContactLink {
        label: "LinkedIn",
        handle: "/in/saran1305",
        href: "https://www.linkedin.com/in/saran1305",
    },
    ContactLink {
        label: "Email",
        handle: "shreecharan1305@gmail.com",
        href: "mailto:shreecharan1305@gmail.com",
    },
];

pub const CONTACT_TITLE: &str = "Let's Build Together";
pub const CONTACT_BLURB: &str =
    "Have a project in mind or want to discuss opportunities? I'd love to hear from you.";

pub fn footer_line(year: u32) -> String {
    format!("© {year} {}. Crafted with passion & precision.", PROFILE.name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineStage {
    pub name: &'static str,
    pub color: &'static str,
    pub status: &'static str,
    pub logs: &'static [&'static str],
}

pub const PIPELINE_STAGES: [PipelineStage; 4] = [
    PipelineStage {
        name: "Code Commit",
        color: "#3b82f6",
        status: "VERSION CONTROL",
        logs: &[
            "> git add .",
            "> git commit -m \"feat: implement command center\"",
            "> git push origin main",
            "[SUCCESS] Pushed to branch 'main'",
            "> Triggering GitHub Action: CI-Pipeline...",
        ],
    },
    PipelineStage {
        name: "Build & Test",
        color: "#22c55e",
        status: "CI PIPELINE",
        logs: &[
            "> docker build -t portfolio-app:latest .",
            "[INFO] Optimization enabled",
            "[INFO] Minifying assets...",
            "> npm run test:unit",
            "[SUCCESS] Build completed in 4.2s",
            "> Pushing image to ECR...",
        ],
    },
    PipelineStage {
        name: "Infrastructure",
        color: "#f59e0b",
        status: "TERRAFORM APPLY",
        logs: &[
            "> terraform init",
            "[AWS] Provisioning EC2 instance (t3.micro)...",
            "[AWS] Configuring load balancer...",
            "> kubectl apply -f deployment.yaml",
            "[SUCCESS] Service exposed on port 80",
            "> Verifying health checks...",
        ],
    },
    PipelineStage {
        name: "Observability",
        color: "#a855f7",
        status: "LIVE METRICS",
        logs: &[
            "> connecting to Splunk forwarder...",
            "[METRICS] CPU: 45% | MEM: 60%",
            "[LOGS] 200 OK - GET /api/health",
            "[LOGS] 200 OK - GET /home",
            "[ALERT] Anomalies: None detected",
            "> Grafana dashboard: ACTIVE",
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub percent: u8,
    pub message: &'static str,
}

pub const MAINTENANCE_START: &str = "Initializing system upgrade...";

pub const MAINTENANCE_MILESTONES: [Milestone; 6] = [
    Milestone { percent: 10, message: "Backing up databases..." },
    Milestone { percent: 30, message: "Optimizing assets..." },
    Milestone { percent: 50, message: "Updating security protocols..." },
    Milestone { percent: 75, message: "Compiling holographic interface..." },
    Milestone { percent: 90, message: "Finalizing deployment..." },
    Milestone { percent: 99, message: "Rebooting systems..." },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_targets_are_unique_sections() {
        let mut sections: Vec<&str> = NAV_ITEMS.iter().map(|item| item.section).collect();
        sections.sort_unstable();
        sections.dedup();
        assert_eq!(sections.len(), NAV_ITEMS.len());
        assert!(HERO_ACTIONS
            .iter()
            .all(|action| sections.contains(&action.section)));
    }

    #[test]
    fn project_filter_splits_by_domain() {
        assert_eq!(ProjectFilter::All.apply().count(), 4);
        let dev: Vec<&str> = ProjectFilter::Domain(ProjectDomain::Development)
            .apply()
            .map(|project| project.title)
            .collect();
        assert_eq!(dev, vec!["Data-Driven Alarm Control", "Market Demand Forecast"]);
        assert_eq!(
            ProjectFilter::Domain(ProjectDomain::CloudDevops).apply().count(),
            2
        );
        let labels: Vec<&str> = ProjectFilter::TABS.iter().map(|tab| tab.label()).collect();
        assert_eq!(
            labels,
            vec!["All Projects", "Full Stack Development", "Cloud & DevOps"]
        );
    }

    #[test]
    fn only_mail_link_stays_in_tab() {
        let new_tab: Vec<&str> = CONTACT_LINKS
            .iter()
            .filter(|link| link.opens_new_tab())
            .map(|link| link.label)
            .collect();
        assert_eq!(new_tab, vec!["GitHub", "LinkedIn"]);
        assert!(CONTACT_LINKS[2].href.ends_with(PROFILE.email));
    }

    #[test]
    fn milestones_ascend() {
        assert!(MAINTENANCE_MILESTONES
            .windows(2)
            .all(|pair| pair[0].percent < pair[1].percent));
        assert_eq!(footer_line(2026), "© 2026 Saran M. Crafted with passion & precision.");
    }
}
