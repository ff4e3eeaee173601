crate::define_id_enum! {
    /// JavaScript framework identifier, named after its primary npm package
    FrameworkId {
        NextJs => "next" : "Next.js" | "nextjs",
        Nuxt => "nuxt" : "Nuxt",
        Astro => "astro" : "Astro",
        SvelteKit => "@sveltejs/kit" : "SvelteKit" | "sveltekit",
        Gatsby => "gatsby" : "Gatsby",
        Angular => "@angular/cli" : "Angular" | "angular",
        NestJs => "@nestjs/cli" : "NestJS" | "nestjs",
        VueCli => "@vue/cli-service" : "Vue CLI" | "vue-cli",
        Vite => "vite" : "Vite",
    }
}
