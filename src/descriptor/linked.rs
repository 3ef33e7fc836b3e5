//! Owner-bound descriptor view: routes, cross-links and hotlinks.

use super::RouteDescriptor;
use crate::core::{Entity, LinkError, Params, Result, RouteValue, merge, prefix_keys, value_text};
use crate::url::UrlGenerator;
use crate::utils::html;
use crate::utils::inflect::{base_name, pluralize};

/// A [`RouteDescriptor`] bound to the entity that owns it.
///
/// Every operation is a pure query against the owner's current attributes.
pub struct Linked<'a, E: ?Sized> {
    descriptor: &'a RouteDescriptor<E>,
    owner: &'a E,
}

impl<E: ?Sized> Clone for Linked<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for Linked<'_, E> {}

impl<'a, E: ?Sized> Linked<'a, E> {
    pub(crate) fn new(descriptor: &'a RouteDescriptor<E>, owner: &'a E) -> Self {
        Self { descriptor, owner }
    }

    #[inline]
    pub fn descriptor(&self) -> &'a RouteDescriptor<E> {
        self.descriptor
    }

    #[inline]
    pub fn owner(&self) -> &'a E {
        self.owner
    }
}

impl<'a, E: Entity + ?Sized> Linked<'a, E> {
    /// Route segment with a single leading `/`.
    ///
    /// Explicit routes are used as configured; otherwise the owner's class
    /// base name is lower-cased and pluralized: `app::models::User` -> `/users`.
    /// An empty segment is `/`, and routes built from it start at the action.
    pub fn route(&self) -> String {
        match self.descriptor.explicit_route() {
            Some(route) => format!("/{route}"),
            None => {
                let class = self.owner.class_name();
                format!("/{}", pluralize(&base_name(&class).to_lowercase()))
            }
        }
    }

    #[inline]
    pub fn default_action(&self) -> &'a str {
        self.descriptor.default_action()
    }

    pub fn default_params(&self) -> Result<Params> {
        self.descriptor.default_params.resolve(self.owner)
    }

    /// Params contributed when this entity is the target of a cross-link.
    ///
    /// Falls back to the default params with every key prefixed by the
    /// lower-cased first letter of the class base name (`id` -> `pid`).
    pub fn linkable_params(&self) -> Result<Params> {
        let params = self.descriptor.linkable_params.resolve(self.owner)?;
        if !params.is_empty() {
            return Ok(params);
        }

        let class = self.owner.class_name();
        let prefix: String = base_name(&class)
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default();
        Ok(prefix_keys(self.default_params()?, &prefix))
    }

    /// Route `{segment}/{action}` with default params merged with `params`.
    ///
    /// `None` or an empty action uses the default action.
    pub fn url_route(&self, action: Option<&str>, params: Params) -> Result<RouteValue> {
        let route = format!("/{}", self.segment_path(action));
        let params = merge(self.default_params()?, params);

        crate::debug!("route"; "{} -> {}", self.owner.class_name(), route);
        Ok(RouteValue::new(route, params))
    }

    /// Cross-link route to `target`: `{segment}/{target segment}/{target action}`.
    ///
    /// The target is nested under this entity's segment, so `user -> photo`
    /// yields `/users/photos/view` while `photo -> user` yields
    /// `/photos/users/view`. Params are this entity's default params merged
    /// with the target's linkable params.
    pub fn url_route_to<F>(
        &self,
        target: &Linked<'_, F>,
        action: Option<&str>,
    ) -> Result<RouteValue>
    where
        F: Entity + ?Sized,
    {
        self.ensure_linkable(target)?;
        let nested = target.segment_path(action);
        self.url_route(Some(nested.as_str()), target.linkable_params()?)
    }

    /// Hotlink markup for [`url_route`](Self::url_route).
    ///
    /// Text is the owner's hotlink text attribute, or the generated url.
    /// Rendered as `<span>` when hotlinks are disabled, `<a href>` otherwise.
    pub fn hotlink<G>(
        &self,
        urls: &G,
        action: Option<&str>,
        params: Params,
        attrs: &[(&str, &str)],
    ) -> Result<String>
    where
        G: UrlGenerator + ?Sized,
    {
        let route = self.url_route(action, params)?;
        self.render(urls, &route, attrs)
    }

    /// Hotlink markup for a cross-link to `target`.
    ///
    /// `params` are merged over the target's linkable params.
    pub fn hotlink_to<F, G>(
        &self,
        urls: &G,
        target: &Linked<'_, F>,
        action: Option<&str>,
        params: Params,
        attrs: &[(&str, &str)],
    ) -> Result<String>
    where
        F: Entity + ?Sized,
        G: UrlGenerator + ?Sized,
    {
        self.ensure_linkable(target)?;
        let nested = target.segment_path(action);
        let params = merge(target.linkable_params()?, params);
        self.hotlink(urls, Some(nested.as_str()), params, attrs)
    }

    fn render<G>(&self, urls: &G, route: &RouteValue, attrs: &[(&str, &str)]) -> Result<String>
    where
        G: UrlGenerator + ?Sized,
    {
        let text = match self.descriptor.hotlink_text_attr() {
            Some(attr) => match self.owner.attribute_path(attr) {
                Some(value) => value_text(&value).into_owned(),
                None => {
                    crate::debug!("hotlink"; "`{}` has no attribute `{}`", self.owner.class_name(), attr);
                    String::new()
                }
            },
            None => urls.to(route, self.descriptor.uses_absolute_url())?,
        };

        if self.descriptor.is_hotlink_disabled() {
            return Ok(html::tag("span", &text, attrs));
        }
        let href = urls.to(route, false)?;
        Ok(html::anchor(&text, &href, attrs))
    }

    /// `{segment}/{action}` without the leading `/`; just `{action}` when
    /// the segment is empty.
    fn segment_path(&self, action: Option<&str>) -> String {
        let action = self.action_or_default(action);
        match self.route().trim_matches('/') {
            "" => action.to_string(),
            segment => format!("{segment}/{action}"),
        }
    }

    fn action_or_default<'b>(&self, action: Option<&'b str>) -> &'b str
    where
        'a: 'b,
    {
        action
            .filter(|action| !action.is_empty())
            .unwrap_or(self.descriptor.default_action())
    }

    fn ensure_linkable<F>(&self, target: &Linked<'_, F>) -> Result<()>
    where
        F: Entity + ?Sized,
    {
        if target.owner.has_capability(self.descriptor.capability()) {
            Ok(())
        } else {
            Err(LinkError::not_linkable(target.owner.class_name()))
        }
    }
}
