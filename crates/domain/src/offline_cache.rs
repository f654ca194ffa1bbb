//! Offline support for the point-of-sale web app.
//!
//! The browser runs a service worker that pre-caches the static shell of the
//! app and answers fetches cache first. The worker script is rendered from an
//! `OfflineCacheManifest` so the cache name, the asset list and the offline
//! fallback are defined in one place.

/// Bump the version suffix whenever the asset list changes. Activation of a
/// worker with a new name deletes every cache with an older name.
pub const CACHE_NAME: &str = "pos-static-v1";

pub const PRECACHE_ASSETS: [&str; 5] = [
    "/",
    "/index.html",
    "/manifest.json",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

pub const OFFLINE_FALLBACK: &str = "/index.html";

#[derive(Debug, Clone, PartialEq)]
pub struct OfflineCacheManifest {
    pub cache_name: String,
    pub assets: Vec<String>,
    pub fallback_document: String,
}

impl Default for OfflineCacheManifest {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            assets: PRECACHE_ASSETS.iter().map(|a| a.to_string()).collect(),
            fallback_document: OFFLINE_FALLBACK.to_string(),
        }
    }
}

impl OfflineCacheManifest {
    /// The worker script. Install precaches the assets and ignores
    /// failures, activate deletes every cache not named `cache_name`, fetch
    /// answers from the cache, then the network, then the fallback document.
    pub fn render_service_worker(&self) -> String {
        // serde_json gives us properly escaped JS string and array literals
        let cache_name = serde_json::to_string(&self.cache_name).unwrap_or_default();
        let assets = serde_json::to_string(&self.assets).unwrap_or_else(|_| "[]".into());
        let fallback = serde_json::to_string(&self.fallback_document).unwrap_or_default();

        format!(
            r##"// Point of sale service worker
const CACHE_NAME = {cache_name};
const PRECACHE_ASSETS = {assets};
const OFFLINE_FALLBACK = {fallback};

self.addEventListener('install', function(event) {{
  event.waitUntil(
    caches.open(CACHE_NAME)
      .then(function(cache) {{ return cache.addAll(PRECACHE_ASSETS); }})
      .catch(function() {{}})
  );
}});

self.addEventListener('activate', function(event) {{
  event.waitUntil(
    caches.keys().then(function(names) {{
      return Promise.all(
        names.filter(function(name) {{ return name !== CACHE_NAME; }})
             .map(function(name) {{ return caches.delete(name); }})
      );
    }})
  );
}});

self.addEventListener('fetch', function(event) {{
  event.respondWith(
    caches.match(event.request).then(function(cached) {{
      if (cached) {{
        return cached;
      }}
      return fetch(event.request).catch(function() {{
        return caches.match(OFFLINE_FALLBACK);
      }});
    }})
  );
}});
"##
        )
    }
}
