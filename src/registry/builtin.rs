use super::ModuleDescriptor;

struct Builtin {
    slug: &'static str,
    label: &'static str,
    icon: &'static str,
    repo: &'static str,
    npm: &'static str,
    description: &'static str,
    pro: bool,
    soon: bool,
    registry_slug: Option<&'static str>,
    content_prefix: &'static str,
}

impl Builtin {
    const fn module(slug: &'static str, label: &'static str, icon: &'static str, repo: &'static str, npm: &'static str, description: &'static str) -> Self {
        Self {
            slug,
            label,
            icon,
            repo,
            npm,
            description,
            pro: false,
            soon: false,
            registry_slug: None,
            content_prefix: "docs/content/",
        }
    }

    const fn pro(mut self) -> Self {
        self.pro = true;
        self
    }

    const fn soon(mut self) -> Self {
        self.soon = true;
        self
    }
}

static BUILTIN_MODULES: &[Builtin] = &[
    Builtin {
        registry_slug: Some("seo"),
        content_prefix: "docs/content/nuxtSeo/",
        ..Builtin::module(
            "nuxt-seo",
            "Nuxt SEO",
            "i-carbon-3d-mpr-toggle",
            "harlan-zw/nuxt-seo",
            "@nuxtjs/seo",
            "The complete SEO solution for Nuxt.",
        )
    },
    Builtin::module(
        "robots",
        "Robots",
        "i-carbon-bot",
        "nuxt-modules/robots",
        "@nuxtjs/robots",
        "Tame the robots crawling and indexing your site with ease.",
    ),
    Builtin::module(
        "sitemap",
        "Sitemap",
        "i-carbon-load-balancer-application",
        "nuxt-modules/sitemap",
        "@nuxtjs/sitemap",
        "Powerfully flexible XML Sitemaps that integrate seamlessly.",
    ),
    Builtin::module(
        "og-image",
        "OG Image",
        "i-carbon-image-search",
        "nuxt-modules/og-image",
        "nuxt-og-image",
        "Generate OG Images with Vue templates in Nuxt.",
    ),
    Builtin::module(
        "schema-org",
        "Schema.org",
        "i-carbon-chart-relationship",
        "harlan-zw/nuxt-schema-org",
        "nuxt-schema-org",
        "The quickest and easiest way to build Schema.org graphs.",
    ),
    Builtin::module(
        "link-checker",
        "Link Checker",
        "i-carbon-cloud-satellite-link",
        "harlan-zw/nuxt-link-checker",
        "nuxt-link-checker",
        "Find and magically fix links that may be negatively effecting your SEO.",
    ),
    Builtin::module(
        "seo-utils",
        "SEO Utils",
        "i-carbon-tools",
        "harlan-zw/nuxt-seo-utils",
        "nuxt-seo-utils",
        "SEO utilities to improve your Nuxt sites discoverability and shareability.",
    ),
    Builtin::module(
        "site-config",
        "Site Config",
        "i-carbon-settings-check",
        "harlan-zw/nuxt-site-config",
        "nuxt-site-config",
        "Powerful build and runtime shared site configuration for Nuxt modules.",
    ),
    Builtin::module(
        "skew-protection",
        "Skew Protection",
        "i-carbon-version",
        "harlan-zw/nuxt-skew-protection",
        "nuxt-skew-protection",
        "Zero downtime deployments for Nuxt applications.",
    )
    .pro(),
    Builtin::module(
        "ai-ready",
        "AI Ready",
        "i-carbon-ai-label",
        "harlan-zw/nuxt-ai-ready",
        "nuxt-ai-ready",
        "Make your Nuxt site discoverable and consumable by AI agents.",
    ),
    Builtin::module(
        "magic-redirects",
        "Magic Redirects",
        "i-carbon-magic-wand",
        "harlan-zw/nuxt-magic-redirects",
        "nuxt-magic-redirects",
        "Easily manage redirects for your Nuxt application with zero configuration.",
    )
    .pro()
    .soon(),
];

/// The modules documented by the site, in display order.
#[must_use]
pub fn builtin_modules() -> Vec<ModuleDescriptor> {
    BUILTIN_MODULES
        .iter()
        .map(|b| ModuleDescriptor {
            slug: b.slug.to_string(),
            label: b.label.to_string(),
            icon: b.icon.to_string(),
            repo: b.repo.to_string(),
            npm: b.npm.to_string(),
            description: b.description.to_string(),
            pro: b.pro,
            soon: b.soon,
            registry_slug: b.registry_slug.map(str::to_string),
            content_prefix: b.content_prefix.to_string(),
        })
        .collect()
}
